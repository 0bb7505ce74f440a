//! # Slotwise Core
//!
//! Domain logic for the Slotwise booking service: turning a resource's local
//! working hours into bookable slots and checking those slots against
//! existing bookings. Everything in [`timezone`], [`slots`] and
//! [`availability`] is pure; calls share no state and perform no I/O.
//!
//! The [`widget`] module holds the contract with the embeddable booking
//! widget.

pub mod availability;
pub mod errors;
pub mod models;
pub mod slots;
pub mod timezone;
pub mod widget;
