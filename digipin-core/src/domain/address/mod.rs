// digipin-core/src/domain/address/mod.rs

pub mod gazetteer;
pub mod matcher;
pub mod parts;
pub mod similarity;

pub use gazetteer::{Gazetteer, GazetteerEntry};
pub use matcher::{AddressMatch, AddressMatcher};
pub use parts::AddressParts;
pub use similarity::similarity;
