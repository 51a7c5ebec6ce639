// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core value types for routing and sidebar coordination.

pub mod ids;
pub mod open;
pub mod route;
pub mod side;

pub use ids::{ActionId, Id, IdError, WidgetId};
pub use open::{factory_for_path, Factory, OpenRequest};
pub use route::{decode_path, encode_path, url_join, Query, Route};
pub use side::Side;
