//! Shared building blocks for the Mamis Solidarias services: versioned message contracts, a
//! fluent HTTP request helper, claim-based authorization policies, and endpoint test doubles.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod http;
pub mod messages;
pub mod obs;
pub mod security;
pub mod testing;

mod _prelude {
	pub use std::{
		any::{Any, TypeId},
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		marker::PhantomData,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use {rust_decimal, tokio_util::sync::CancellationToken, url, uuid};
#[cfg(test)] use {color_eyre as _, httpmock as _};
