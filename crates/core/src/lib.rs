#![deny(warnings)]

pub mod config;
pub mod gateway;
pub mod history;
pub mod ocr;
