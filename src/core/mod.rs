pub mod building_profile;
pub mod climate_zone;
pub mod free_float;
pub mod lighting;
pub mod psychrometrics;
pub mod solar;
pub mod space_load;
pub mod units;
