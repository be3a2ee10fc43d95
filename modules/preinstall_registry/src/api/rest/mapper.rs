//! Mapper implementations for converting between DTOs and contract models
//!
//! This module contains all From/Into implementations for bidirectional
//! conversion between REST DTOs and transport-agnostic contract models.

use super::dto::*;
use crate::contract;

// ===== Submission conversions =====

impl From<contract::Submission> for SubmissionDto {
    fn from(submission: contract::Submission) -> Self {
        Self {
            id: submission.id,
            intersection_name: submission.intersection_name,
            city: submission.city,
            state: submission.state,
            end_user: submission.end_user,
            distributor: submission.distributor,
            cabinet_type: submission.cabinet_type,
            tls_connection: submission.tls_connection,
            detection_io: submission.detection_io,
            phasing: submission.phasing,
            timing_plans: submission.timing_plans,
            submitted_at: submission.submitted_at,
        }
    }
}

impl From<SubmitRequest> for contract::SubmissionPayload {
    fn from(req: SubmitRequest) -> Self {
        Self {
            intersection_name: req.intersection_name,
            city: req.city,
            state: req.state,
            end_user: req.end_user,
            distributor: req.distributor,
            other_distributor: req.other_distributor,
            cabinet_type: req.cabinet_type,
            other_cabinet_type: req.other_cabinet_type,
            tls_connection: req.tls_connection,
            other_tls_connection: req.other_tls_connection,
            detection_io: req.detection_io,
            other_detection_io: req.other_detection_io,
            phasing_text: req.phasing_text,
            timing_plans: req.timing_plans,
        }
    }
}

impl From<contract::SubmitReceipt> for SubmitResponse {
    fn from(receipt: contract::SubmitReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message,
            id: receipt.id,
        }
    }
}

// ===== Query conversions =====

impl ListSubmissionsQuery {
    /// Split into the domain filter and page request; unparsable numbers count as unset
    pub fn into_parts(self) -> (contract::SubmissionFilter, contract::PageRequest) {
        fn number(value: Option<String>) -> Option<i64> {
            value.and_then(|v| v.trim().parse().ok())
        }

        let page = contract::PageRequest {
            page: number(self.page),
            limit: number(self.limit),
        };
        let filter = contract::SubmissionFilter {
            search: self.search,
            city: self.city,
            state: self.state,
            cabinet_type: self.cabinet_type,
        };
        (filter, page)
    }
}

impl From<contract::SubmissionPage> for SubmissionsListResponse {
    fn from(page: contract::SubmissionPage) -> Self {
        Self {
            submissions: page.submissions.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

impl From<contract::FilterValues> for FiltersResponse {
    fn from(values: contract::FilterValues) -> Self {
        Self {
            cities: values.cities,
            states: values.states,
            cabinet_types: values.cabinet_types,
        }
    }
}
