#![allow(dead_code)]

pub mod faulty_store;
pub mod fixtures;
pub mod stub_geocoder;
