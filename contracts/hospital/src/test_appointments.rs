#![cfg(test)]

use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::{symbol_short, vec, Address, Env, IntoVal, TryIntoVal};

use crate::test::{register_doctor, register_patient, setup, text};
use crate::*;

fn changes(env: &Env, status: &str) -> AppointmentChanges {
    AppointmentChanges {
        status: text(env, status),
        date: None,
        time: None,
        notes: None,
    }
}

fn confirm_at(env: &Env, date: &str, time: &str) -> AppointmentChanges {
    AppointmentChanges {
        status: text(env, "confirmed"),
        date: Some(text(env, date)),
        time: Some(text(env, time)),
        notes: None,
    }
}

fn ids(env: &Env, list: soroban_sdk::Vec<Appointment>) -> soroban_sdk::Vec<u64> {
    let mut out = soroban_sdk::Vec::new(env);
    for appointment in list.iter() {
        out.push_back(appointment.id);
    }
    out
}

#[test]
fn test_request_appointment() {
    let (env, client) = setup();
    env.ledger().with_mut(|li| li.timestamp = 1_700_000_000);
    let (_, doctor) = register_doctor(&env, &client, "dr.house");
    let (patient, patient_profile) = register_patient(&env, &client, "jane");

    let appointment =
        client.request_appointment(&patient, &doctor.id, &Some(text(&env, "Recurring migraines")));
    let events = env.events().all();

    assert_eq!(appointment.id, 1);
    assert_eq!(appointment.doctor_id, doctor.user.id);
    assert_eq!(appointment.patient_id, patient_profile.user.id);
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.date, DateSlot::Unset);
    assert_eq!(appointment.time, TimeSlot::Unset);
    assert_eq!(appointment.notes, Some(text(&env, "Recurring migraines")));
    assert_eq!(appointment.requested_at, 1_700_000_000);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (
            symbol_short!("APT_REQ"),
            patient_profile.user.id,
            doctor.user.id
        )
            .into_val(&env)
    );
    let payload: events::AppointmentRequestedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.appointment_id, 1);

    assert_eq!(client.get_appointment(&patient, &appointment.id), appointment);
}

#[test]
fn test_request_appointment_rejections() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (patient, _) = register_patient(&env, &client, "jane");

    assert_eq!(
        client.try_request_appointment(&house, &doctor.id, &None),
        Err(Ok(HospitalError::NotAPatient))
    );
    assert_eq!(
        client.try_request_appointment(&patient, &42, &None),
        Err(Ok(HospitalError::DoctorNotFound))
    );
    assert_eq!(client.list_appointments(&patient, &0, &10).len(), 0);
}

#[test]
fn test_confirm_sets_schedule() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (patient, _) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&patient, &doctor.id, &None);

    env.ledger().with_mut(|li| li.timestamp = 1_700_000_500);
    let confirmed =
        client.update_appointment(&house, &appointment.id, &confirm_at(&env, "2025-03-01", "10:00"));
    let events = env.events().all();

    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert_eq!(confirmed.date.get(), Date::new(2025, 3, 1));
    assert_eq!(confirmed.time.get(), TimeOfDay::new(10, 0, 0));
    assert_eq!(confirmed.updated_at, 1_700_000_500);
    assert_eq!(client.get_appointment(&patient, &appointment.id), confirmed);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("APT_UPD"), appointment.id).into_val(&env)
    );
    let payload: events::AppointmentUpdatedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.previous, AppointmentStatus::Pending);
    assert_eq!(payload.status, AppointmentStatus::Confirmed);

    let rescheduled = client.update_appointment(
        &house,
        &appointment.id,
        &confirm_at(&env, "03/02/2025", "02:30 PM"),
    );
    assert_eq!(rescheduled.status, AppointmentStatus::Confirmed);
    assert_eq!(rescheduled.date.get(), Date::new(2025, 3, 2));
    assert_eq!(rescheduled.time.get(), TimeOfDay::new(14, 30, 0));
}

#[test]
fn test_cancel_ignores_supplied_schedule() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (patient, _) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&patient, &doctor.id, &None);

    let mut cancel = confirm_at(&env, "2025-03-01", "10:00");
    cancel.status = text(&env, "cancelled");
    let cancelled = client.update_appointment(&house, &appointment.id, &cancel);

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(cancelled.date, DateSlot::Unset);
    assert_eq!(cancelled.time, TimeSlot::Unset);
}

#[test]
fn test_update_rejections() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (wilson, _) = register_doctor(&env, &client, "dr.wilson");
    let (patient, _) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&patient, &doctor.id, &None);

    assert_eq!(
        client.try_update_appointment(&patient, &appointment.id, &changes(&env, "confirmed")),
        Err(Ok(HospitalError::NotADoctor))
    );
    assert_eq!(
        client.try_update_appointment(&house, &77, &changes(&env, "confirmed")),
        Err(Ok(HospitalError::AppointmentNotFound))
    );
    assert_eq!(
        client.try_update_appointment(&wilson, &appointment.id, &changes(&env, "confirmed")),
        Err(Ok(HospitalError::NotAssignedDoctor))
    );
    for status in ["pending", "bogus", ""] {
        assert_eq!(
            client.try_update_appointment(&house, &appointment.id, &changes(&env, status)),
            Err(Ok(HospitalError::InvalidStatus))
        );
    }

    let mut with_notes = changes(&env, "confirmed");
    with_notes.notes = Some(text(&env, "doctor scribbles"));
    assert_eq!(
        client.try_update_appointment(&house, &appointment.id, &with_notes),
        Err(Ok(HospitalError::ReadOnlyField))
    );

    assert_eq!(
        client.try_update_appointment(
            &house,
            &appointment.id,
            &confirm_at(&env, "2025-02-30", "10:00")
        ),
        Err(Ok(HospitalError::InvalidDate))
    );
    assert_eq!(
        client.try_update_appointment(
            &house,
            &appointment.id,
            &confirm_at(&env, "2025-03-01", "25:00")
        ),
        Err(Ok(HospitalError::InvalidTime))
    );

    let unchanged = client.get_appointment(&house, &appointment.id);
    assert_eq!(unchanged, appointment);
}

#[test]
fn test_terminal_states_are_final() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (patient, _) = register_patient(&env, &client, "jane");
    let appointment = client.request_appointment(&patient, &doctor.id, &None);

    assert_eq!(
        client.try_update_appointment(&house, &appointment.id, &changes(&env, "completed")),
        Err(Ok(HospitalError::InvalidTransition))
    );

    client.update_appointment(&house, &appointment.id, &confirm_at(&env, "2025-03-01", "10:00"));
    let completed =
        client.update_appointment(&house, &appointment.id, &changes(&env, "completed"));
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert_eq!(completed.date.get(), Date::new(2025, 3, 1));

    for status in ["confirmed", "cancelled", "completed"] {
        assert_eq!(
            client.try_update_appointment(&house, &appointment.id, &changes(&env, status)),
            Err(Ok(HospitalError::InvalidTransition))
        );
    }
    assert_eq!(client.get_appointment(&patient, &appointment.id), completed);
}

#[test]
fn test_participants_only() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (wilson, _) = register_doctor(&env, &client, "dr.wilson");
    let (jane, _) = register_patient(&env, &client, "jane");
    let (john, _) = register_patient(&env, &client, "john");
    let appointment = client.request_appointment(&jane, &doctor.id, &None);

    assert_eq!(client.get_appointment(&house, &appointment.id), appointment);
    assert_eq!(client.get_appointment(&jane, &appointment.id), appointment);
    assert_eq!(
        client.try_get_appointment(&wilson, &appointment.id),
        Err(Ok(HospitalError::NotAParticipant))
    );
    assert_eq!(
        client.try_get_appointment(&john, &appointment.id),
        Err(Ok(HospitalError::NotAParticipant))
    );
    assert_eq!(
        client.try_get_appointment(&jane, &99),
        Err(Ok(HospitalError::AppointmentNotFound))
    );
}

#[test]
fn test_list_appointments_scope_and_order() {
    let (env, client) = setup();
    let (house, house_profile) = register_doctor(&env, &client, "dr.house");
    let (wilson, wilson_profile) = register_doctor(&env, &client, "dr.wilson");
    let (jane, _) = register_patient(&env, &client, "jane");
    let (john, _) = register_patient(&env, &client, "john");

    let early = client.request_appointment(&jane, &house_profile.id, &None);
    let unscheduled = client.request_appointment(&jane, &house_profile.id, &None);
    let late = client.request_appointment(&john, &house_profile.id, &None);
    let elsewhere = client.request_appointment(&jane, &wilson_profile.id, &None);

    client.update_appointment(&house, &early.id, &confirm_at(&env, "2025-03-01", "09:00"));
    client.update_appointment(&house, &late.id, &confirm_at(&env, "2025-03-01", "16:00"));
    client.update_appointment(&wilson, &elsewhere.id, &confirm_at(&env, "2025-04-01", "08:00"));

    assert_eq!(
        ids(&env, client.list_appointments(&house, &0, &10)),
        vec![&env, late.id, early.id, unscheduled.id]
    );
    assert_eq!(
        ids(&env, client.list_appointments(&jane, &0, &10)),
        vec![&env, elsewhere.id, early.id, unscheduled.id]
    );
    assert_eq!(
        ids(&env, client.list_appointments(&john, &0, &10)),
        vec![&env, late.id]
    );
    assert_eq!(
        ids(&env, client.list_appointments(&wilson, &0, &10)),
        vec![&env, elsewhere.id]
    );

    let stranger = Address::generate(&env);
    assert_eq!(
        client.try_list_appointments(&stranger, &0, &10),
        Err(Ok(HospitalError::NotRegistered))
    );
}

#[test]
fn test_list_appointments_pages_from_latest_request() {
    let (env, client) = setup();
    let (house, doctor) = register_doctor(&env, &client, "dr.house");
    let (jane, _) = register_patient(&env, &client, "jane");
    let (john, _) = register_patient(&env, &client, "john");

    let first = client.request_appointment(&jane, &doctor.id, &None);
    let second = client.request_appointment(&jane, &doctor.id, &None);
    let third = client.request_appointment(&jane, &doctor.id, &None);
    let fourth = client.request_appointment(&john, &doctor.id, &None);

    client.update_appointment(&house, &first.id, &confirm_at(&env, "2025-03-05", "09:00"));
    client.update_appointment(&house, &fourth.id, &confirm_at(&env, "2025-03-01", "09:00"));

    assert_eq!(
        ids(&env, client.list_appointments(&house, &0, &2)),
        vec![&env, fourth.id, third.id]
    );
    assert_eq!(
        ids(&env, client.list_appointments(&house, &2, &2)),
        vec![&env, first.id, second.id]
    );
    assert_eq!(
        ids(&env, client.list_appointments(&house, &1, &3)),
        vec![&env, first.id, third.id, second.id]
    );
    assert_eq!(client.list_appointments(&house, &4, &2).len(), 0);
    assert_eq!(
        ids(&env, client.list_appointments(&jane, &0, &1)),
        vec![&env, third.id]
    );

    assert_eq!(
        client.try_list_appointments(&house, &0, &11),
        Err(Ok(HospitalError::InvalidPage))
    );
    assert_eq!(
        client.try_list_appointments(&house, &0, &0),
        Err(Ok(HospitalError::InvalidPage))
    );
}

#[test]
fn test_writable_fields() {
    let (env, client) = setup();

    assert_eq!(
        client.writable_fields(&Role::Patient),
        vec![
            &env,
            AppointmentField::Date,
            AppointmentField::Time,
            AppointmentField::Notes
        ]
    );
    assert_eq!(
        client.writable_fields(&Role::Doctor),
        vec![
            &env,
            AppointmentField::Status,
            AppointmentField::Date,
            AppointmentField::Time
        ]
    );
}
