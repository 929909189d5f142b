#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;

#[cfg(feature = "client")]
pub use client::run;

#[cfg(feature = "client")]
mod client {
    use std::sync::Arc;

    use crate::forms::auth::LoginForm;
    use crate::forms::filters::FilterForm;
    use crate::models::config::ClientConfig;
    use crate::repository::ApiClient;
    use crate::services::leads::LeadsSynchronizer;
    use crate::services::{ServiceError, ServiceResult, auth};
    use crate::session::Session;

    /// Signs in, loads the first page of leads and logs it.
    pub async fn run(config: ClientConfig) -> ServiceResult<()> {
        let session = Arc::new(Session::new());
        let api = Arc::new(
            ApiClient::new(&config.api_url, session.clone())
                .map_err(|err| ServiceError::store(err, "Invalid API URL"))?,
        );

        api.health()
            .await
            .map_err(|err| ServiceError::store(err, "Lead API is unreachable"))?;

        if auth::restore_session(api.as_ref(), &session).await.is_none() {
            let form = LoginForm {
                email: config.email.clone().unwrap_or_default(),
                password: config.password.clone().unwrap_or_default(),
            };
            auth::login(api.as_ref(), &session, &form).await?;
        }

        let mut filters = FilterForm::default();
        if let Some(status) = &config.status {
            filters.set_status(status)?;
        }

        let leads = LeadsSynchronizer::with_page_size(api.clone(), config.page_size);
        leads.change_filters(filters.into_filters()).await?;

        let view = leads.snapshot();
        log::info!(
            "Showing {} of {} leads (page {} of {})",
            view.leads.len(),
            view.pagination.total,
            view.pagination.page,
            view.pagination.total_pages
        );
        let window: Vec<String> = view
            .pagination
            .page_window()
            .into_iter()
            .map(|page| page.map_or_else(|| "…".to_string(), |page| page.to_string()))
            .collect();
        log::info!("Pages: {}", window.join(" "));

        for lead in &view.leads {
            log::info!(
                "{} | {} | {} | {} | score {} | {:.2}",
                lead.id,
                lead.full_name(),
                lead.company,
                lead.status.label(),
                lead.score,
                lead.lead_value
            );
        }

        Ok(())
    }
}
