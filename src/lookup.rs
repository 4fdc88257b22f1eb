//! Vehicle lookup: fetch the registry page and turn it into a record

use tracing::{info, warn};

use crate::{
    errors::VehicleInfoError,
    extractor::Extractor,
    models::{RegistrationNumber, VehicleRecord},
    upstream::UpstreamClient,
};

/// Characters of visible page text returned in debug mode
pub const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct VehicleLookup {
    upstream: UpstreamClient,
}

impl VehicleLookup {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Look up `rc`, always producing a record
    ///
    /// Network failures and pages without any known label come back as
    /// records with `ok == false`.
    pub async fn lookup(&self, rc: &RegistrationNumber, debug: bool) -> VehicleRecord {
        let page = match self.upstream.fetch_page(rc).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Lookup of {} failed: {}", rc, e);
                return VehicleRecord::failure(rc.as_str(), &e);
            }
        };

        build_record(rc, &page, debug)
    }
}

/// Build the record for a fetched page
pub fn build_record(rc: &RegistrationNumber, page: &str, debug: bool) -> VehicleRecord {
    let extractor = Extractor::parse(page);

    if debug {
        info!("Returning debug preview for {}", rc);
        return VehicleRecord::preview(rc, extractor.preview(PREVIEW_CHARS));
    }

    let details = extractor.extract_details();
    if details.is_empty() {
        warn!("No records found for {}", rc);
        return VehicleRecord::failure(rc.as_str(), &VehicleInfoError::NoRecordsFound);
    }

    info!("Found vehicle details for {}", rc);
    VehicleRecord::found(rc, details)
}
