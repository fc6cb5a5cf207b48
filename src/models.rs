use chrono::NaiveDate;
use diesel::{
    Selectable,
    prelude::{Identifiable, Insertable, Queryable},
};
use serde::Serialize;

// Serialized field names match the rendered column headings, so typed rows
// and dynamic rows go through the same table renderer.

// Doctors

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = crate::schema::doctors)]
#[diesel(primary_key(doctor_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DoctorEntity {
    #[serde(rename = "DoctorID")]
    pub doctor_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Specialization")]
    pub specialization: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::doctors)]
pub struct CreateDoctorEntity {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
}

// Patients

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = crate::schema::patients)]
#[diesel(primary_key(patient_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PatientEntity {
    #[serde(rename = "PatientID")]
    pub patient_id: i32,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "DateOfBirth")]
    pub date_of_birth: NaiveDate,
    #[serde(rename = "Gender")]
    pub gender: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::patients)]
pub struct CreatePatientEntity {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

// Appointments

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(primary_key(appointment_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentEntity {
    #[serde(rename = "AppointmentID")]
    pub appointment_id: i32,
    #[serde(rename = "PatientID")]
    pub patient_id: i32,
    #[serde(rename = "DoctorID")]
    pub doctor_id: i32,
    #[serde(rename = "AppointmentDate")]
    pub appointment_date: NaiveDate,
    #[serde(rename = "Status")]
    pub status: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::appointments)]
pub struct CreateAppointmentEntity {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    pub status: String,
}

// Prescriptions

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = crate::schema::prescriptions)]
#[diesel(primary_key(prescription_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PrescriptionEntity {
    #[serde(rename = "PrescriptionID")]
    pub prescription_id: i32,
    #[serde(rename = "AppointmentID")]
    pub appointment_id: i32,
    #[serde(rename = "Medication")]
    pub medication: String,
    #[serde(rename = "Dosage")]
    pub dosage: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::prescriptions)]
pub struct CreatePrescriptionEntity {
    pub appointment_id: i32,
    pub medication: String,
    pub dosage: String,
}

// Billing

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = crate::schema::billing)]
#[diesel(primary_key(bill_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillEntity {
    #[serde(rename = "BillID")]
    pub bill_id: i32,
    #[serde(rename = "PatientID")]
    pub patient_id: i32,
    #[serde(rename = "Amount")]
    pub amount: f32,
    #[serde(rename = "PaymentStatus")]
    pub payment_status: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::billing)]
pub struct CreateBillEntity {
    pub patient_id: i32,
    pub amount: f32,
    pub payment_status: String,
}

// Legacy patient intake; only ever written, so no query-side entity.

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::patient_records)]
pub struct CreatePatientRecordEntity {
    pub name: String,
    pub age: i32,
    pub disease: String,
}
