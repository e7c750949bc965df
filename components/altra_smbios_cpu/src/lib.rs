//! SMBIOS processor and cache reporting for Ampere(R) Altra(R) platforms
//!
//! This crate produces the SMBIOS Type 4 (Processor Information) and Type 7 (Cache
//! Information) records for each processor socket and registers them with the host
//! SMBIOS table manager.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐     ┌───────────────────────────┐
//! │ Platform information │     │ Identification registers  │
//! │ HOB (clocks, CPMs,   │     │ (MIDR_EL1, CCSIDR_EL1)    │
//! │ SKU fuses, ECID)     │     │                           │
//! └──────────┬───────────┘     └────────────┬──────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            CpuSmbiosTables (per-socket blueprints)      │
//! │                                                         │
//! │  update pass:                                           │
//! │  • core counts, speeds, voltage into Type 4 fields      │
//! │  • product name / part number / ECID serial into the    │
//! │    string pack (string_pack::update_string_pack)        │
//! │  • cache geometry into Type 7 size and configuration    │
//! │    encodings (cache::encode_cache_size)                 │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │ Installer: Type 7 first (L1I, L1D, L2 per socket), the  │
//! │ assigned L1I/L2 handles threaded into that socket's     │
//! │ Type 4 cache-handle fields, then Type 4                 │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │
//!                            ▼
//!                   host Smbios service
//! ```
//!
//! # Modules
//!
//! - [`component`]: the table update pass and installer
//! - [`tables`]: default record blueprints and their string packs
//! - [`record`]: SMBIOS Type 4 / Type 7 structures and field encodings
//! - [`cache`]: cache size and configuration encodings
//! - [`string_pack`]: string pack measurement and editing
//! - [`error`]: error types for table production
//!
//! # License
//!
//! Copyright (c) Microsoft Corporation.
//!
//! SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod cache;
pub mod component;
pub mod error;
pub mod record;
pub mod string_pack;
pub mod tables;
