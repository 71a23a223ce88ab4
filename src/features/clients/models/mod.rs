mod client;

pub use client::{Cliente, ClienteRow, Region};
