//! Pizzeria Chat - Conversational menu concierge
//!
//! This crate guides a guest through a pizzeria's menu one click at a time:
//! category, taste refinement, pizza, companions and a final recap, with a
//! dedicated gluten-free path.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
