//! Thin helpers over `cpal` for finding and probing local audio devices.
pub mod device;
pub mod microphone;
