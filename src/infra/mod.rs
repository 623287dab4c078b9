//! Инфраструктурный слой вокруг покерного движка:
//! RNG-реализации для перемешивания колоды.

pub mod rng;

pub use rng::{DeterministicRng, SystemRng};
