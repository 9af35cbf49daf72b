#![cfg(test)]

use soroban_sdk::testutils::Events;
use soroban_sdk::{symbol_short, Env, IntoVal, String, TryIntoVal};

use crate::test::{register_doctor, register_patient, setup, text};
use crate::*;

fn amoxicillin(env: &Env) -> (String, String, String) {
    (
        text(env, "Amoxicillin"),
        text(env, "500mg"),
        text(env, "Three times daily after meals for seven days."),
    )
}

#[test]
fn test_create_prescription() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (jane, patient) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&jane, &doctor.id, &None);

    let (medicine, dosage, instructions) = amoxicillin(&env);
    let prescription =
        client.create_prescription(&house, &appointment.id, &medicine, &dosage, &instructions);
    let events = env.events().all();

    assert_eq!(prescription.id, 1);
    assert_eq!(prescription.appointment_id, appointment.id);
    assert_eq!(prescription.doctor_id, doctor.user.id);
    assert_eq!(prescription.patient_id, patient.user.id);
    assert_eq!(prescription.medicine_name, medicine);
    assert_eq!(prescription.dosage, dosage);
    assert_eq!(prescription.instructions, instructions);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("RX_ISS"), patient.user.id, doctor.user.id).into_val(&env)
    );
    let payload: events::PrescriptionIssuedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.prescription_id, prescription.id);
    assert_eq!(payload.appointment_id, appointment.id);

    assert_eq!(client.get_prescription(&jane, &prescription.id), prescription);
    assert_eq!(client.get_prescription(&house, &prescription.id), prescription);
}

#[test]
fn test_one_prescription_per_appointment() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (jane, _) = register_patient(&env, &client, "jane");
    let first = client.request_appointment(&jane, &doctor.id, &None);
    let second = client.request_appointment(&jane, &doctor.id, &None);

    let (medicine, dosage, instructions) = amoxicillin(&env);
    client.create_prescription(&house, &first.id, &medicine, &dosage, &instructions);

    assert_eq!(
        client.try_create_prescription(&house, &first.id, &medicine, &dosage, &instructions),
        Err(Ok(HospitalError::PrescriptionExists))
    );

    let other = client.create_prescription(&house, &second.id, &medicine, &dosage, &instructions);
    assert_eq!(other.id, 2);
    assert_eq!(client.list_prescriptions(&jane, &0, &10).len(), 2);

    let second_page = client.list_prescriptions(&jane, &1, &1);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page.get(0).unwrap(), other);
    assert_eq!(
        client.try_list_prescriptions(&jane, &0, &11),
        Err(Ok(HospitalError::InvalidPage))
    );
}

#[test]
fn test_create_prescription_rejections() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (wilson, _) = register_doctor(&env, &client, "dr.wilson");
    let (jane, _) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&jane, &doctor.id, &None);
    let (medicine, dosage, instructions) = amoxicillin(&env);
    let empty = text(&env, "");

    assert_eq!(
        client.try_create_prescription(&jane, &appointment.id, &medicine, &dosage, &instructions),
        Err(Ok(HospitalError::NotADoctor))
    );
    assert_eq!(
        client.try_create_prescription(&house, &500, &medicine, &dosage, &instructions),
        Err(Ok(HospitalError::AppointmentNotFound))
    );
    assert_eq!(
        client.try_create_prescription(&wilson, &appointment.id, &medicine, &dosage, &instructions),
        Err(Ok(HospitalError::NotAssignedDoctor))
    );
    assert_eq!(
        client.try_create_prescription(&house, &appointment.id, &empty, &dosage, &instructions),
        Err(Ok(HospitalError::InvalidInput))
    );
    assert_eq!(
        client.try_create_prescription(&house, &appointment.id, &medicine, &empty, &instructions),
        Err(Ok(HospitalError::InvalidInput))
    );
    assert_eq!(
        client.try_create_prescription(&house, &appointment.id, &medicine, &dosage, &empty),
        Err(Ok(HospitalError::InvalidInput))
    );

    assert_eq!(client.list_prescriptions(&house, &0, &10).len(), 0);
    let issued =
        client.create_prescription(&house, &appointment.id, &medicine, &dosage, &instructions);
    assert_eq!(issued.id, 1);
}

#[test]
fn test_prescription_visibility() {
    let (env, client) = setup();
    let (house, house_profile) = register_doctor(&env, &client, "dr.house");
    let (wilson, wilson_profile) = register_doctor(&env, &client, "dr.wilson");
    let (jane, _) = register_patient(&env, &client, "jane");
    let (john, _) = register_patient(&env, &client, "john");
    let (medicine, dosage, instructions) = amoxicillin(&env);

    let jane_visit = client.request_appointment(&jane, &house_profile.id, &None);
    let john_visit = client.request_appointment(&john, &wilson_profile.id, &None);
    let for_jane =
        client.create_prescription(&house, &jane_visit.id, &medicine, &dosage, &instructions);
    let for_john =
        client.create_prescription(&wilson, &john_visit.id, &medicine, &dosage, &instructions);

    let house_list = client.list_prescriptions(&house, &0, &10);
    assert_eq!(house_list.len(), 1);
    assert_eq!(house_list.get(0).unwrap(), for_jane);

    let john_list = client.list_prescriptions(&john, &0, &10);
    assert_eq!(john_list.len(), 1);
    assert_eq!(john_list.get(0).unwrap(), for_john);

    assert_eq!(
        client.try_get_prescription(&john, &for_jane.id),
        Err(Ok(HospitalError::NotAParticipant))
    );
    assert_eq!(
        client.try_get_prescription(&wilson, &for_jane.id),
        Err(Ok(HospitalError::NotAParticipant))
    );
    assert_eq!(
        client.try_get_prescription(&jane, &99),
        Err(Ok(HospitalError::PrescriptionNotFound))
    );
}
