//! Flavors for common radio families
//!
//! Both header-byte schemes are covered:
//! - [`cc1101`]: flag bits for read (bit 7) and burst (bit 6)
//! - [`rfm69`]: a single write flag (bit 7); bursts auto-increment
//! - [`offset`]: reads, writes and bursts at fixed offsets from the
//!   logical address
//!
//! Each flavor carries a [`BusConfig`](crate::BusConfig) with the chip's
//! usual wiring as its default.

mod cc1101;
mod offset;
mod rfm69;

pub use cc1101::*;
pub use offset::*;
pub use rfm69::*;
