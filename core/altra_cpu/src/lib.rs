//! # Altra CPU Library
//!
//! Processor identification and cache geometry for the Ampere(R) Altra(R) family.
//!
//! The [`registers`] module reads the AArch64 identification registers (`MIDR_EL1`,
//! `CCSIDR_EL1`) on target and substitutes fixed Neoverse-shaped values on hosted
//! builds so the derivation logic stays testable. The [`cache`] module decodes cache
//! geometry from `CCSIDR_EL1` values, and [`topology`] interprets the platform
//! information HOB into socket and core counts, frequencies, and SKU identity.
//!
//! ## License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0
//!
#![cfg_attr(not(test), no_std)]

pub mod cache;
pub mod registers;
pub mod topology;
