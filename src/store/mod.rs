//! Local durable storage.

pub mod token;
