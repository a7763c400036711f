pub mod strecke;
