// SPDX-License-Identifier: MIT

//! Reusable egui components structured for MVU-style updates.

pub mod address_book;
pub mod entries;
pub mod entry;
