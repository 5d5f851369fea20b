use chrono::NaiveDate;
use mockall::mock;

use crate::models::DbSurgery;

// Mock repositories for testing
mock! {
    pub SurgeryRepo {
        pub async fn bookings_for_theater_on_date(
            &self,
            ot_id: String,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbSurgery>>;
    }
}
