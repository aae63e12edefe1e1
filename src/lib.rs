//! Pokedex Arena - catalogue, random picks and stat battles over PokéAPI
//!
//! The library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod dex;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod state;
