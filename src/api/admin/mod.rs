// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Back-office endpoints: booking list, dashboard figures and the
//! knowledge-base document library

pub mod handler;
pub mod response;

pub use handler::{
    admin_bookings_handler, admin_stats_handler, list_documents_handler, upload_document_handler,
};
pub use response::{DocumentListResponse, DocumentUploadResponse};
