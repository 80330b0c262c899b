// SPDX-License-Identifier: MPL-2.0

//! Device backend abstraction

pub mod camera;
