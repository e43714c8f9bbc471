pub mod color;
pub mod config;
pub mod listen;
pub mod mode;
pub mod send;
pub mod theme;
