//! Coursework Teams API Library
//!
//! Team management for assignments and courses: listing, manual and random
//! formation, renaming, deletion, and copying teams between an assignment
//! and its course.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod service;
