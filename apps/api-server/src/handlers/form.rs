//! Extractor for create/update bodies.
//!
//! Accepts `multipart/form-data` (text fields plus at most one `image` file)
//! or `application/json`. Any other body is read as an empty form.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures::TryStreamExt;
use futures::future::{LocalBoxFuture, ready};

use quill_core::domain::{IMAGE_FIELD, ImageUpload, PostFields};
use quill_core::error::UploadError;
use quill_shared::dto::{CountValue, PostRequest};

use crate::middleware::error::AppError;

/// A parsed create/update body.
///
/// An image here has passed the type filter but is not stored yet.
#[derive(Debug, Default)]
pub struct PostSubmission {
    pub fields: PostFields,
    pub image: Option<ImageUpload>,
}

enum BodyKind {
    Multipart,
    Json,
    Other,
}

impl BodyKind {
    fn of(req: &HttpRequest) -> Self {
        match req.mime_type() {
            Ok(Some(m)) if m.type_() == mime::MULTIPART && m.subtype() == mime::FORM_DATA => {
                BodyKind::Multipart
            }
            Ok(Some(m)) if m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON) => {
                BodyKind::Json
            }
            _ => BodyKind::Other,
        }
    }
}

impl FromRequest for PostSubmission {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        match BodyKind::of(req) {
            BodyKind::Multipart => {
                let multipart = Multipart::new(req.headers(), payload.take());
                Box::pin(read_multipart(multipart))
            }
            BodyKind::Json => {
                let json = web::Json::<PostRequest>::from_request(req, payload);
                Box::pin(async move {
                    let body = json
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    Ok(PostSubmission {
                        fields: fields_from_request(body.into_inner()),
                        image: None,
                    })
                })
            }
            BodyKind::Other => Box::pin(ready(Ok(PostSubmission::default()))),
        }
    }
}

fn fields_from_request(req: PostRequest) -> PostFields {
    PostFields {
        title: req.title,
        content: req.content,
        author: req.author,
        category: req.category,
        likes: req.likes.map(CountValue::into_text),
        comments: req.comments.map(CountValue::into_text),
        image: None,
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PostSubmission, AppError> {
    let mut submission = PostSubmission::default();

    while let Some(mut field) = multipart.try_next().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match file_name {
            // A file input left empty by the browser
            Some(file_name) if file_name.is_empty() => {
                read_bytes(&mut field).await?;
            }
            Some(file_name) => {
                if name != IMAGE_FIELD || submission.image.is_some() {
                    return Err(UploadError::UnexpectedField(name).into());
                }

                let content_type = field.content_type().map(|m| m.essence_str().to_string());
                let mut upload = ImageUpload::accept(&file_name, content_type.as_deref())?;
                while let Some(chunk) = field.try_next().await.map_err(bad_form)? {
                    upload.extend(&chunk);
                }
                submission.image = Some(upload);
            }
            None => {
                let value = String::from_utf8(read_bytes(&mut field).await?).map_err(|_| {
                    AppError::BadRequest(format!("Field {} is not valid UTF-8", name))
                })?;
                if !submission.fields.set(&name, value) {
                    tracing::debug!(field = %name, "Ignoring unknown form field");
                }
            }
        }
    }

    Ok(submission)
}

async fn read_bytes(field: &mut Field) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_form)? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn bad_form(err: MultipartError) -> AppError {
    AppError::BadRequest(err.to_string())
}
