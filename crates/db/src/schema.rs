use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            specialization VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            department VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create patients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            age INTEGER NOT NULL CHECK (age >= 0),
            gender VARCHAR(64) NOT NULL,
            medical_record_number VARCHAR(128) NOT NULL,
            phone VARCHAR(64) NOT NULL,
            emergency_contact VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create surgeries table. Doctors and patients may be deleted while
    // their surgeries stay on record, so there are no foreign keys here.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS surgeries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            patient_id UUID NOT NULL,
            doctor_id UUID NOT NULL,
            surgery_date DATE NOT NULL,
            surgery_time TIME NOT NULL,
            ot_id VARCHAR(64) NOT NULL,
            anesthesiologist VARCHAR(255) NOT NULL,
            anesthesia_type VARCHAR(128) NOT NULL,
            assistant_surgeon VARCHAR(255) NULL,
            nurses TEXT[] NOT NULL DEFAULT '{}',
            pre_op_events TEXT NULL,
            post_op_events TEXT NULL,
            surgical_report_url TEXT NULL,
            notes TEXT NULL,
            required_instruments TEXT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'scheduled',
            is_emergency BOOLEAN NOT NULL DEFAULT FALSE,
            duration_minutes INTEGER NOT NULL DEFAULT 120,
            needs_manual_resolution BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NULL,
            cancelled_at TIMESTAMP WITH TIME ZONE NULL,
            CONSTRAINT valid_status CHECK (status IN ('scheduled', 'in_progress', 'completed', 'cancelled')),
            CONSTRAINT valid_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create audit_logs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audit_logs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            action VARCHAR(64) NOT NULL,
            surgery_id UUID NOT NULL,
            user_id VARCHAR(255) NOT NULL,
            timestamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            details TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_surgeries_ot_date ON surgeries(ot_id, surgery_date)",
        "CREATE INDEX IF NOT EXISTS idx_surgeries_date_time ON surgeries(surgery_date, surgery_time)",
        "CREATE INDEX IF NOT EXISTS idx_surgeries_doctor_id ON surgeries(doctor_id)",
        "CREATE INDEX IF NOT EXISTS idx_surgeries_patient_id ON surgeries(patient_id)",
        "CREATE INDEX IF NOT EXISTS idx_audit_logs_timestamp ON audit_logs(timestamp DESC)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
