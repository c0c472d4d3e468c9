// SPDX-License-Identifier: MIT

//! Domain layer: pure data types and validation helpers shared between UI and send logic.

pub mod address_book;
pub mod recipient;
