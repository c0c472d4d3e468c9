// SPDX-License-Identifier: MIT

//! Pure business logic, kept free of UI types.

pub mod batch;
