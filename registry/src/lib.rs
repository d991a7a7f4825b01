use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::notifier::LoggingNotificationSink;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::repository::room::RoomRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::room::RoomRepository;
use kernel::repository::user::UserRepository;
use kernel::service::availability::AvailabilityService;
use kernel::service::reminder::ReminderService;
use kernel::service::reservation::ReservationService;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    room_repository: Arc<dyn RoomRepository>,
    user_repository: Arc<dyn UserRepository>,
    reservation_service: Arc<ReservationService>,
    availability_service: Arc<AvailabilityService>,
    reminder_service: Arc<ReminderService>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let room_repository: Arc<dyn RoomRepository> =
            Arc::new(RoomRepositoryImpl::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let notification_sink = Arc::new(LoggingNotificationSink::new());

        let reservation_service = Arc::new(ReservationService::new(
            room_repository.clone(),
            user_repository.clone(),
            reservation_repository.clone(),
            notification_sink.clone(),
        ));
        let availability_service = Arc::new(AvailabilityService::new(
            room_repository.clone(),
            reservation_repository.clone(),
        ));
        let reminder_service = Arc::new(ReminderService::new(
            reservation_repository,
            notification_sink,
        ));

        Self {
            health_check_repository,
            room_repository,
            user_repository,
            reservation_service,
            availability_service,
            reminder_service,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn room_repository(&self) -> Arc<dyn RoomRepository> {
        self.room_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn reservation_service(&self) -> Arc<ReservationService> {
        self.reservation_service.clone()
    }

    pub fn availability_service(&self) -> Arc<AvailabilityService> {
        self.availability_service.clone()
    }

    pub fn reminder_service(&self) -> Arc<ReminderService> {
        self.reminder_service.clone()
    }
}
