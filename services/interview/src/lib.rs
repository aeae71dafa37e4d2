pub mod config;
pub mod microphone_adapter;
pub mod persona_adapter;
pub mod view;
