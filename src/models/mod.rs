mod notification;
mod real_estate;
mod recommendation;
mod state;
mod user;
mod weather_recommendation;

pub use notification::{Notification, NotificationStatus};
pub use real_estate::{NewRealEstate, RealEstate};
pub use recommendation::{NewRecommendation, Recommendation};
pub use state::AppState;
pub use user::{DeletedRecords, NewUser, NotificationFrequency, User};
pub use weather_recommendation::WeatherBasedRecommendation;
