use anyhow::Context;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing,
};
use chrono::NaiveDate;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use serde::Deserialize;
use tracing::info;

use crate::{
    errors::AppError,
    models::{
        AppointmentEntity, BillEntity, CreateAppointmentEntity, CreateBillEntity,
        CreateDoctorEntity, CreatePatientEntity, CreatePatientRecordEntity,
        CreatePrescriptionEntity, DoctorEntity, PatientEntity, PrescriptionEntity,
    },
    schema::{appointments, billing, doctors, patient_records, patients, prescriptions},
    state::AppState,
    views,
};

/// Window rendered after every insert: the newest rows by descending id.
const RECENT_ROWS: i64 = 10;

/// Insert endpoints for the clinical tables.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/insert", routing::post(insert_record))
        .route("/insert-doctor", routing::post(insert_doctor))
        .route("/insert-patient", routing::post(insert_patient))
        .route("/insert-appointment", routing::post(insert_appointment))
        .route("/insert-prescription", routing::post(insert_prescription))
        .route("/insert-bill", routing::post(insert_bill))
}

#[derive(Deserialize)]
struct InsertRecordReq {
    name: String,
    age: i32,
    disease: String,
}

/// Legacy intake: insert and confirm, no re-select.
async fn insert_record(
    State(state): State<AppState>,
    Form(body): Form<InsertRecordReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(patient_records::table)
        .values(CreatePatientRecordEntity {
            name: body.name,
            age: body.age,
            disease: body.disease,
        })
        .execute(conn)
        .await?;

    info!("Inserted a legacy patient record");
    Ok("Patient data inserted successfully!")
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertDoctorReq {
    first_name: String,
    last_name: String,
    specialization: String,
}

async fn insert_doctor(
    State(state): State<AppState>,
    Form(body): Form<InsertDoctorReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(doctors::table)
        .values(CreateDoctorEntity {
            first_name: body.first_name,
            last_name: body.last_name,
            specialization: body.specialization,
        })
        .execute(conn)
        .await?;

    let recent: Vec<DoctorEntity> = doctors::table
        .order_by(doctors::doctor_id.desc())
        .limit(RECENT_ROWS)
        .select(DoctorEntity::as_select())
        .get_results(conn)
        .await?;

    info!("Inserted a doctor");
    Ok(Html(views::result_page(&views::entity_rows(&recent)?)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertPatientReq {
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    gender: String,
}

async fn insert_patient(
    State(state): State<AppState>,
    Form(body): Form<InsertPatientReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(patients::table)
        .values(CreatePatientEntity {
            first_name: body.first_name,
            last_name: body.last_name,
            date_of_birth: body.date_of_birth,
            gender: body.gender,
        })
        .execute(conn)
        .await?;

    let recent: Vec<PatientEntity> = patients::table
        .order_by(patients::patient_id.desc())
        .limit(RECENT_ROWS)
        .select(PatientEntity::as_select())
        .get_results(conn)
        .await?;

    info!("Inserted a patient");
    Ok(Html(views::result_page(&views::entity_rows(&recent)?)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAppointmentReq {
    patient_id: i32,
    doctor_id: i32,
    appointment_date: NaiveDate,
    status: String,
}

async fn insert_appointment(
    State(state): State<AppState>,
    Form(body): Form<InsertAppointmentReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(appointments::table)
        .values(CreateAppointmentEntity {
            patient_id: body.patient_id,
            doctor_id: body.doctor_id,
            appointment_date: body.appointment_date,
            status: body.status,
        })
        .execute(conn)
        .await?;

    let recent: Vec<AppointmentEntity> = appointments::table
        .order_by(appointments::appointment_id.desc())
        .limit(RECENT_ROWS)
        .select(AppointmentEntity::as_select())
        .get_results(conn)
        .await?;

    info!("Inserted an appointment");
    Ok(Html(views::result_page(&views::entity_rows(&recent)?)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertPrescriptionReq {
    appointment_id: i32,
    medication: String,
    dosage: String,
}

async fn insert_prescription(
    State(state): State<AppState>,
    Form(body): Form<InsertPrescriptionReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(prescriptions::table)
        .values(CreatePrescriptionEntity {
            appointment_id: body.appointment_id,
            medication: body.medication,
            dosage: body.dosage,
        })
        .execute(conn)
        .await?;

    let recent: Vec<PrescriptionEntity> = prescriptions::table
        .order_by(prescriptions::prescription_id.desc())
        .limit(RECENT_ROWS)
        .select(PrescriptionEntity::as_select())
        .get_results(conn)
        .await?;

    info!("Inserted a prescription");
    Ok(Html(views::result_page(&views::entity_rows(&recent)?)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertBillReq {
    patient_id: i32,
    amount: f32,
    payment_status: String,
}

async fn insert_bill(
    State(state): State<AppState>,
    Form(body): Form<InsertBillReq>,
) -> Result<impl IntoResponse, AppError> {
    let conn = &mut state
        .db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    diesel::insert_into(billing::table)
        .values(CreateBillEntity {
            patient_id: body.patient_id,
            amount: body.amount,
            payment_status: body.payment_status,
        })
        .execute(conn)
        .await?;

    let recent: Vec<BillEntity> = billing::table
        .order_by(billing::bill_id.desc())
        .limit(RECENT_ROWS)
        .select(BillEntity::as_select())
        .get_results(conn)
        .await?;

    info!("Inserted a bill");
    Ok(Html(views::result_page(&views::entity_rows(&recent)?)))
}
