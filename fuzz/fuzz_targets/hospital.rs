#![no_main]

use arbitrary::Arbitrary;
use hospital::{
    AppointmentChanges, HospitalContract, HospitalContractClient, HospitalError, ProfileDetails,
    Registration, Role,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, String};

const ACTORS: usize = 6;
const STATUSES: [&str; 5] = ["confirmed", "cancelled", "completed", "pending", "archived"];

#[derive(Arbitrary, Debug)]
enum Op {
    Register { actor: u8, doctor: bool },
    Request { actor: u8, doctor_profile: u8 },
    Update { actor: u8, appointment: u8, status: u8, day: u8, hour: u8 },
    Prescribe { actor: u8, appointment: u8 },
    Read { actor: u8, appointment: u8 },
}

fuzz_target!(|ops: Vec<Op>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HospitalContract, ());
    let client = HospitalContractClient::new(&env, &contract_id);
    let actors: Vec<Address> = (0..ACTORS).map(|_| Address::generate(&env)).collect();
    let actor = |index: u8| &actors[index as usize % ACTORS];
    let text = |value: &str| String::from_str(&env, value);

    for op in ops.into_iter().take(64) {
        match op {
            Op::Register { actor: index, doctor } => {
                let registration = Registration {
                    username: text(&format!("user{}", index as usize % ACTORS)),
                    email: text(""),
                    first_name: text("Fuzz"),
                    last_name: text("Actor"),
                    password_verifier: BytesN::from_array(&env, &[index | 1; 32]),
                    role: if doctor { Role::Doctor } else { Role::Patient },
                    profile: ProfileDetails::Empty,
                };
                let _ = client.try_register(actor(index), &registration);
            }
            Op::Request {
                actor: index,
                doctor_profile,
            } => {
                let doctor_profile_id = u64::from(doctor_profile % 8);
                let _ = client.try_request_appointment(actor(index), &doctor_profile_id, &None);
            }
            Op::Update {
                actor: index,
                appointment,
                status,
                day,
                hour,
            } => {
                let appointment_id = u64::from(appointment % 16);
                let changes = AppointmentChanges {
                    status: text(STATUSES[status as usize % STATUSES.len()]),
                    date: Some(text(&format!("2025-06-{:02}", day % 32))),
                    time: Some(text(&format!("{:02}:00", hour % 26))),
                    notes: None,
                };
                let before = client.try_get_appointment(actor(index), &appointment_id);
                let after = client.try_update_appointment(actor(index), &appointment_id, &changes);
                if let (Ok(Ok(before)), Ok(Ok(after))) = (before, after) {
                    assert!(before.status.can_transition_to(after.status));
                    assert_eq!(before.doctor_id, after.doctor_id);
                    assert_eq!(before.patient_id, after.patient_id);
                }
            }
            Op::Prescribe {
                actor: index,
                appointment,
            } => {
                let appointment_id = u64::from(appointment % 16);
                let (medicine, dosage, instructions) =
                    (text("Ibuprofen"), text("200mg"), text("Twice daily."));
                let first = client.try_create_prescription(
                    actor(index),
                    &appointment_id,
                    &medicine,
                    &dosage,
                    &instructions,
                );
                if let Ok(Ok(prescription)) = first {
                    let again = client.try_create_prescription(
                        actor(index),
                        &appointment_id,
                        &medicine,
                        &dosage,
                        &instructions,
                    );
                    assert_eq!(again, Err(Ok(HospitalError::PrescriptionExists)));
                    assert_eq!(prescription.appointment_id, appointment_id);
                }
            }
            Op::Read {
                actor: index,
                appointment,
            } => {
                let appointment_id = u64::from(appointment % 16);
                if let Ok(Ok(found)) = client.try_get_appointment(actor(index), &appointment_id) {
                    let caller = client.current_user(actor(index));
                    assert!(caller.id == found.doctor_id || caller.id == found.patient_id);
                }
            }
        }
    }
});
