//! Response header helpers: entity alerts and pagination.

use crate::error::{AppError, ConfigError};
use crate::page::Page;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use std::str::FromStr;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Alert header names derived from the application name:
/// `X-<app>-alert`, `X-<app>-params` and `X-<app>-error`.
#[derive(Clone, Debug)]
pub struct Alerts {
    app_name: String,
    alert: HeaderName,
    params: HeaderName,
    error: HeaderName,
}

impl Alerts {
    pub fn new(app_name: &str) -> Result<Self, ConfigError> {
        let name = |suffix: &str| {
            HeaderName::from_str(&format!("X-{}-{}", app_name, suffix))
                .map_err(|_| ConfigError::InvalidAppName(app_name.to_string()))
        };
        if app_name.is_empty() {
            return Err(ConfigError::InvalidAppName(app_name.to_string()));
        }
        Ok(Alerts {
            app_name: app_name.to_string(),
            alert: name("alert")?,
            params: name("params")?,
            error: name("error")?,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    fn alert(&self, message: &str, param: &str) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(self.alert.clone(), HeaderValue::from_str(message)?);
        headers.insert(self.params.clone(), HeaderValue::from_str(param)?);
        Ok(headers)
    }

    pub fn entity_created(&self, entity: &str, id: &str) -> Result<HeaderMap, AppError> {
        self.alert(&format!("{}.{}.created", self.app_name, entity), id)
    }

    pub fn entity_updated(&self, entity: &str, id: &str) -> Result<HeaderMap, AppError> {
        self.alert(&format!("{}.{}.updated", self.app_name, entity), id)
    }

    pub fn entity_deleted(&self, entity: &str, id: &str) -> Result<HeaderMap, AppError> {
        self.alert(&format!("{}.{}.deleted", self.app_name, entity), id)
    }

    pub fn failure(&self, entity: &str, error_key: &str, message: &str) -> Result<HeaderMap, AppError> {
        tracing::debug!(entity, error_key, "entity operation failed: {}", message);
        let mut headers = HeaderMap::new();
        headers.insert(
            self.error.clone(),
            HeaderValue::from_str(&format!("error.{}", error_key))?,
        );
        headers.insert(self.params.clone(), HeaderValue::from_str(entity)?);
        Ok(headers)
    }
}

/// `X-Total-Count` and `Link` headers for a page served from `base_url`.
pub fn pagination_headers<T>(page: &Page<T>, base_url: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_COUNT_HEADER),
        HeaderValue::from(page.total_elements),
    );
    headers.insert(header::LINK, HeaderValue::from_str(&page.link_header(base_url))?);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageRequest;

    #[test]
    fn creation_alert() {
        let alerts = Alerts::new("demoApp").unwrap();
        let headers = alerts.entity_created("demo", "12").unwrap();
        assert_eq!(headers.get("x-demoapp-alert").unwrap(), "demoApp.demo.created");
        assert_eq!(headers.get("x-demoapp-params").unwrap(), "12");
    }

    #[test]
    fn failure_alert() {
        let alerts = Alerts::new("demoApp").unwrap();
        let headers = alerts
            .failure("demo1", "idexists", "A new demo1 cannot already have an ID")
            .unwrap();
        assert_eq!(headers.get("x-demoapp-error").unwrap(), "error.idexists");
        assert_eq!(headers.get("x-demoapp-params").unwrap(), "demo1");
        assert!(headers.get("x-demoapp-alert").is_none());
    }

    #[test]
    fn invalid_app_names() {
        assert!(Alerts::new("").is_err());
        assert!(Alerts::new("demo\napp").is_err());
    }

    #[test]
    fn pagination_total_count() {
        let page = Page::new(vec![1, 2], &PageRequest::new(0, 2), 3);
        let headers = pagination_headers(&page, "/api/demos").unwrap();
        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "3");
        assert!(headers
            .get(header::LINK)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("rel=\"next\""));
    }
}
