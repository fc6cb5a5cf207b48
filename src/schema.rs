// Tables are owned and provisioned outside this service; column `sql_name`s
// follow the database's folded (all-lowercase) identifiers.

diesel::table! {
    appointments (appointment_id) {
        #[sql_name = "appointmentid"]
        appointment_id -> Int4,
        #[sql_name = "patientid"]
        patient_id -> Int4,
        #[sql_name = "doctorid"]
        doctor_id -> Int4,
        #[sql_name = "appointmentdate"]
        appointment_date -> Date,
        status -> Varchar,
    }
}

diesel::table! {
    billing (bill_id) {
        #[sql_name = "billid"]
        bill_id -> Int4,
        #[sql_name = "patientid"]
        patient_id -> Int4,
        amount -> Float4,
        #[sql_name = "paymentstatus"]
        payment_status -> Varchar,
    }
}

diesel::table! {
    doctors (doctor_id) {
        #[sql_name = "doctorid"]
        doctor_id -> Int4,
        #[sql_name = "firstname"]
        first_name -> Varchar,
        #[sql_name = "lastname"]
        last_name -> Varchar,
        specialization -> Varchar,
    }
}

diesel::table! {
    // Legacy intake table kept alongside the structured patients table.
    patient_records (id) {
        id -> Int4,
        name -> Varchar,
        age -> Int4,
        disease -> Varchar,
    }
}

diesel::table! {
    patients (patient_id) {
        #[sql_name = "patientid"]
        patient_id -> Int4,
        #[sql_name = "firstname"]
        first_name -> Varchar,
        #[sql_name = "lastname"]
        last_name -> Varchar,
        #[sql_name = "dateofbirth"]
        date_of_birth -> Date,
        gender -> Varchar,
    }
}

diesel::table! {
    prescriptions (prescription_id) {
        #[sql_name = "prescriptionid"]
        prescription_id -> Int4,
        #[sql_name = "appointmentid"]
        appointment_id -> Int4,
        medication -> Varchar,
        dosage -> Varchar,
    }
}

diesel::joinable!(appointments -> doctors (doctor_id));
diesel::joinable!(appointments -> patients (patient_id));
diesel::joinable!(billing -> patients (patient_id));
diesel::joinable!(prescriptions -> appointments (appointment_id));

diesel::allow_tables_to_appear_in_same_query!(
    appointments,
    billing,
    doctors,
    patient_records,
    patients,
    prescriptions,
);
