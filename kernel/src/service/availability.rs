use std::sync::Arc;

use derive_new::new;

use crate::model::period::Period;
use crate::model::room::Room;
use crate::repository::reservation::ReservationRepository;
use crate::repository::room::RoomRepository;
use shared::error::AppResult;

/// Lists the rooms that can take a booking for a given period: active rooms
/// with no overlapping non-cancelled reservation.
#[derive(new)]
pub struct AvailabilityService {
    room_repository: Arc<dyn RoomRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl AvailabilityService {
    pub async fn list_available_rooms(&self, period: &Period) -> AppResult<Vec<Room>> {
        let mut available = Vec::new();
        for room in self.room_repository.find_active().await? {
            let conflicts = self
                .reservation_repository
                .find_conflicting(room.id(), period, None)
                .await?;
            if conflicts.is_empty() {
                available.push(room);
            }
        }
        Ok(available)
    }
}
