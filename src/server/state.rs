use crate::country::{CountryNameResolver, Geocoder};
use std::sync::Mutex;

pub type DynGeocoder = Box<dyn Geocoder + Send>;

pub struct AppState {
    pub resolver: Mutex<CountryNameResolver<DynGeocoder>>,
}
