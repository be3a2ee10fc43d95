//! Submit-form extractor accepting multipart, urlencoded and JSON bodies

use super::{dto::SubmitRequest, error::Problem};
use crate::contract::RegistryError;
use axum::{
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::{header, StatusCode},
    Form, Json,
};
use bytes::{Bytes, BytesMut};

/// Per-file size cap, installed on the router as an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimit(pub usize);

impl Default for UploadLimit {
    fn default() -> Self {
        Self(10 * 1024 * 1024)
    }
}

/// File parts the registration form may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Phasing,
    TimingPlans,
}

impl Attachment {
    pub fn form_name(self) -> &'static str {
        match self {
            Self::Phasing => "phasingFile",
            Self::TimingPlans => "timingPlans",
        }
    }

    fn from_form_name(name: &str) -> Option<Self> {
        match name {
            "phasingFile" => Some(Self::Phasing),
            "timingPlans" => Some(Self::TimingPlans),
            _ => None,
        }
    }
}

/// Uploaded file held in memory until the submission passes validation
#[derive(Debug, Clone)]
pub struct UploadedPart {
    pub attachment: Attachment,
    pub file_name: String,
    pub content: Bytes,
}

/// Decoded `POST /api/submit` body
#[derive(Debug, Clone, Default)]
pub struct SubmitForm {
    pub request: SubmitRequest,
    pub files: Vec<UploadedPart>,
}

impl<S> FromRequest<S> for SubmitForm
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<mime::Mime>().ok());

        match content_type {
            Some(ct) if ct.type_() == mime::MULTIPART && ct.subtype() == mime::FORM_DATA => {
                let limit = req
                    .extensions()
                    .get::<UploadLimit>()
                    .copied()
                    .unwrap_or_default();
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| Problem::new(e.status(), e.body_text()))?;
                read_multipart(multipart, limit).await
            }
            Some(ct) if ct.subtype() == mime::JSON || ct.suffix() == Some(mime::JSON) => {
                let Json(request) = Json::<SubmitRequest>::from_request(req, state)
                    .await
                    .map_err(|e| malformed_body(e.status(), e.body_text()))?;
                Ok(Self {
                    request,
                    files: Vec::new(),
                })
            }
            _ => {
                let Form(request) = Form::<SubmitRequest>::from_request(req, state)
                    .await
                    .map_err(|e| malformed_body(e.status(), e.body_text()))?;
                Ok(Self {
                    request,
                    files: Vec::new(),
                })
            }
        }
    }
}

/// Undecodable form bodies are a client error; only oversize bodies keep their own status
fn malformed_body(status: StatusCode, message: String) -> Problem {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        Problem::new(status, message)
    } else {
        Problem::new(StatusCode::BAD_REQUEST, message)
    }
}

async fn read_multipart(mut multipart: Multipart, limit: UploadLimit) -> Result<SubmitForm, Problem> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Problem::new(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let Some(attachment) = Attachment::from_form_name(&name) else {
                tracing::debug!(field = %name, "Ignoring unexpected file part");
                continue;
            };
            let content = read_limited(field, attachment, limit).await?;
            // Browsers send an empty part when no file was chosen
            if file_name.is_empty() || content.is_empty() {
                continue;
            }
            form.files.retain(|part| part.attachment != attachment);
            form.files.push(UploadedPart {
                attachment,
                file_name,
                content,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| Problem::new(e.status(), e.body_text()))?;
            assign_text_field(&mut form.request, &name, value);
        }
    }

    Ok(form)
}

async fn read_limited(
    mut field: Field<'_>,
    attachment: Attachment,
    limit: UploadLimit,
) -> Result<Bytes, Problem> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| Problem::new(e.status(), e.body_text()))?
    {
        if buf.len() + chunk.len() > limit.0 {
            return Err(RegistryError::UploadTooLarge {
                field: attachment.form_name().to_string(),
                limit: limit.0,
            }
            .into());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Place a multipart text part into the matching form field; unknown names are dropped
pub fn assign_text_field(request: &mut SubmitRequest, name: &str, value: String) {
    let slot = match name {
        "intersectionName" => &mut request.intersection_name,
        "city" => &mut request.city,
        "state" => &mut request.state,
        "endUser" => &mut request.end_user,
        "distributor" => &mut request.distributor,
        "otherDistributor" => &mut request.other_distributor,
        "cabinetType" => &mut request.cabinet_type,
        "otherCabinetType" => &mut request.other_cabinet_type,
        "tlsConnection" => &mut request.tls_connection,
        "otherTlsConnection" => &mut request.other_tls_connection,
        "detectionIO" => &mut request.detection_io,
        "otherDetectionIO" => &mut request.other_detection_io,
        "phasingText" => &mut request.phasing_text,
        "timingPlans" => &mut request.timing_plans,
        _ => return,
    };
    *slot = Some(value);
}
