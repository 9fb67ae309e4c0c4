use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;

use crate::domain::{
    context::RequestContext,
    entity::{Entity, INVALID_ID, NOT_FOUND},
    models::{Outcome, Page, RecordId},
    ports::{inbound::RecordService, outbound::RecordStore},
    validation::FormInput,
    RecordError,
};

/// Implementation of the RecordService inbound port.
///
/// One generic pipeline serves every entity: the [`Entity`] descriptor
/// supplies validation and messages, the [`RecordStore`] outbound port
/// supplies persistence.
pub struct RecordServiceImpl<E, S> {
    store: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> RecordServiceImpl<E, S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, S: RecordStore<E>> RecordServiceImpl<E, S> {
    fn verify_csrf(ctx: &RequestContext, submitted_token: &str) -> Result<(), RecordError> {
        if ctx.csrf_token().verify(submitted_token) {
            Ok(())
        } else {
            tracing::warn!(entity = %E::KIND, "Rejected write with invalid CSRF token");
            Err(RecordError::InvalidCsrfToken)
        }
    }

    /// Looks up the addressed record, leaving a flash behind when there is none.
    async fn resolve(
        &self,
        ctx: &mut RequestContext,
        id: Option<RecordId>,
    ) -> Result<Option<E>, RecordError> {
        let Some(id) = id else {
            ctx.set_flash(INVALID_ID);
            return Ok(None);
        };

        let record = self.store.find_by_id(id).await?;
        if record.is_none() {
            tracing::debug!(entity = %E::KIND, %id, "Record not found");
            ctx.set_flash(NOT_FOUND);
        }

        Ok(record)
    }
}

#[async_trait]
impl<E: Entity, S: RecordStore<E>> RecordService<E> for RecordServiceImpl<E, S> {
    async fn index(&self, ctx: &mut RequestContext) -> Result<Outcome<E>, RecordError> {
        let records = self.store.find_all().await?;
        let flash = ctx.take_flash();

        Ok(Outcome::Render(Page::List { records, flash }))
    }

    fn create_form(&self) -> Outcome<E> {
        Outcome::form(None, Vec::new(), E::form_defaults())
    }

    async fn edit_form(
        &self,
        ctx: &mut RequestContext,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError> {
        Ok(match self.resolve(ctx, id).await? {
            Some(record) => {
                let values = record.form_values();
                Outcome::form(Some(record), Vec::new(), values)
            }
            None => Outcome::RedirectToList,
        })
    }

    async fn show(
        &self,
        ctx: &mut RequestContext,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError> {
        Ok(match self.resolve(ctx, id).await? {
            Some(record) => Outcome::Render(Page::Detail { record }),
            None => Outcome::RedirectToList,
        })
    }

    async fn store(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        input: &FormInput,
    ) -> Result<Outcome<E>, RecordError> {
        Self::verify_csrf(ctx, submitted_token)?;

        let fields = match E::validate(input).into_fields() {
            Ok(fields) => fields,
            Err(invalid) => return Ok(Outcome::form(None, invalid.errors, invalid.values)),
        };

        let record = self.store.create(&fields).await?;
        tracing::info!(entity = %E::KIND, id = %record.id(), "Record created");

        ctx.set_flash(E::MESSAGES.created);
        Ok(Outcome::RedirectToList)
    }

    async fn update(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        id: Option<RecordId>,
        input: &FormInput,
    ) -> Result<Outcome<E>, RecordError> {
        Self::verify_csrf(ctx, submitted_token)?;

        let Some(record) = self.resolve(ctx, id).await? else {
            return Ok(Outcome::RedirectToList);
        };

        let fields = match E::validate(input).into_fields() {
            Ok(fields) => fields,
            Err(invalid) => {
                return Ok(Outcome::form(Some(record), invalid.errors, invalid.values));
            }
        };

        let updated = record.with_changes(fields);
        if self.store.update(&updated).await? {
            tracing::info!(entity = %E::KIND, id = %updated.id(), "Record updated");
            ctx.set_flash(E::MESSAGES.updated);
        } else {
            ctx.set_flash(NOT_FOUND);
        }

        Ok(Outcome::RedirectToList)
    }

    async fn delete(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError> {
        Self::verify_csrf(ctx, submitted_token)?;

        let Some(id) = id else {
            ctx.set_flash(INVALID_ID);
            return Ok(Outcome::RedirectToList);
        };

        if self.store.delete(id).await? {
            tracing::info!(entity = %E::KIND, %id, "Record deleted");
            ctx.set_flash(E::MESSAGES.deleted);
        } else {
            ctx.set_flash(NOT_FOUND);
        }

        Ok(Outcome::RedirectToList)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::MockRecordStore;
    use crate::domain::{
        csrf::CsrfToken,
        models::{Project, Task, TaskFields, TaskStatus},
    };

    const TOKEN: &str = "session-token";

    fn service() -> (RecordServiceImpl<Task, MockRecordStore<Task>>, MockRecordStore<Task>) {
        let store = MockRecordStore::new();
        (RecordServiceImpl::new(Arc::new(store.clone())), store)
    }

    fn ctx() -> RequestContext {
        RequestContext::new(CsrfToken::new(TOKEN), None)
    }

    fn task_input(title: &str, status: &str) -> FormInput {
        [("title", title), ("status", status)].into_iter().collect()
    }

    async fn seed(store: &MockRecordStore<Task>, title: &str) -> Task {
        store
            .create(&TaskFields {
                title: title.to_string(),
                description: None,
                status: TaskStatus::Todo,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn store_creates_record_and_sets_flash() {
        let (service, store) = service();
        let mut ctx = ctx();

        let outcome = service
            .store(&mut ctx, TOKEN, &task_input("Buy milk", "todo"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some("Eintrag erstellt."));

        let records = store.all_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Buy milk");
        assert_eq!(records[0].created_at(), records[0].updated_at());
    }

    #[tokio::test]
    async fn csrf_mismatch_never_reaches_the_store() {
        let (service, store) = service();
        let existing = seed(&store, "Keep me").await;
        let writes_before = store.write_count();
        let input = task_input("Changed", "done");

        for submitted in ["", "wrong-token"] {
            let mut ctx = ctx();
            assert!(matches!(
                service.store(&mut ctx, submitted, &input).await,
                Err(RecordError::InvalidCsrfToken)
            ));
            assert!(matches!(
                service
                    .update(&mut ctx, submitted, Some(existing.id()), &input)
                    .await,
                Err(RecordError::InvalidCsrfToken)
            ));
            assert!(matches!(
                service.delete(&mut ctx, submitted, Some(existing.id())).await,
                Err(RecordError::InvalidCsrfToken)
            ));
            assert_eq!(ctx.flash(), None);
        }

        assert_eq!(store.write_count(), writes_before);
        assert_eq!(store.all_records(), vec![existing]);
    }

    #[tokio::test]
    async fn invalid_input_re_renders_create_form() {
        let (service, store) = service();
        let mut ctx = ctx();

        let outcome = service
            .store(&mut ctx, TOKEN, &task_input("", "todo"))
            .await
            .unwrap();

        match outcome {
            Outcome::Render(Page::Form {
                record,
                errors,
                values,
            }) => {
                assert!(record.is_none());
                assert_eq!(errors, vec!["Titel ist erforderlich.".to_string()]);
                assert_eq!(values.get("status"), "todo");
            }
            other => panic!("expected form, got {other:?}"),
        }
        assert_eq!(store.write_count(), 0);
        assert_eq!(ctx.flash(), None);
    }

    #[tokio::test]
    async fn update_applies_changes() {
        let (service, store) = service();
        let existing = seed(&store, "Draft").await;
        let mut ctx = ctx();

        let outcome = service
            .update(
                &mut ctx,
                TOKEN,
                Some(existing.id()),
                &task_input("Final", "done"),
            )
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some("Eintrag aktualisiert."));

        let updated = store.all_records().remove(0);
        assert_eq!(updated.id(), existing.id());
        assert_eq!(updated.title(), "Final");
        assert_eq!(updated.status(), TaskStatus::Done);
        assert_eq!(updated.created_at(), existing.created_at());
        assert!(updated.updated_at() >= existing.updated_at());
    }

    #[tokio::test]
    async fn update_of_vanished_record_flashes_not_found() {
        let (service, store) = service();
        let existing = seed(&store, "Draft").await;
        let store = store.vanish_on_update();
        let mut ctx = ctx();

        let outcome = service
            .update(
                &mut ctx,
                TOKEN,
                Some(existing.id()),
                &task_input("Final", "done"),
            )
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(NOT_FOUND));
        assert!(store.all_records().is_empty());
    }

    #[tokio::test]
    async fn update_with_invalid_input_keeps_record_context() {
        let (service, store) = service();
        let existing = seed(&store, "Draft").await;
        let mut ctx = ctx();

        let outcome = service
            .update(&mut ctx, TOKEN, Some(existing.id()), &task_input("", "nope"))
            .await
            .unwrap();

        match outcome {
            Outcome::Render(Page::Form { record, errors, .. }) => {
                assert_eq!(record, Some(existing.clone()));
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected form, got {other:?}"),
        }
        assert_eq!(store.all_records(), vec![existing]);
    }

    #[tokio::test]
    async fn update_without_valid_id_redirects_with_flash() {
        let (service, store) = service();
        let writes_before = store.write_count();

        let mut ctx = ctx();
        let outcome = service
            .update(&mut ctx, TOKEN, None, &task_input("x", "todo"))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(INVALID_ID));

        let mut ctx = RequestContext::new(CsrfToken::new(TOKEN), None);
        let outcome = service
            .update(&mut ctx, TOKEN, Some(RecordId::new(99)), &task_input("x", "todo"))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(NOT_FOUND));

        assert_eq!(store.write_count(), writes_before);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let (service, store) = service();
        let existing = seed(&store, "Obsolete").await;
        let mut ctx = ctx();

        let outcome = service
            .delete(&mut ctx, TOKEN, Some(existing.id()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some("Eintrag gelöscht."));
        assert!(store.all_records().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_fatal() {
        let (service, _store) = service();
        let mut ctx = ctx();

        let outcome = service
            .delete(&mut ctx, TOKEN, Some(RecordId::new(404)))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(NOT_FOUND));
    }

    #[tokio::test]
    async fn delete_without_id_skips_the_store() {
        let (service, store) = service();
        let mut ctx = ctx();

        let outcome = service.delete(&mut ctx, TOKEN, None).await.unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(INVALID_ID));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn index_pulls_flash_once() {
        let (service, store) = service();
        seed(&store, "Older").await;
        seed(&store, "Newer").await;

        let mut ctx = RequestContext::new(CsrfToken::new(TOKEN), Some("Eintrag erstellt.".into()));
        let Outcome::Render(Page::List { records, flash }) = service.index(&mut ctx).await.unwrap()
        else {
            panic!("expected list");
        };
        assert_eq!(flash.as_deref(), Some("Eintrag erstellt."));
        assert_eq!(records.len(), 2);
        assert!(records[0].updated_at() >= records[1].updated_at());

        let Outcome::Render(Page::List { flash, .. }) = service.index(&mut ctx).await.unwrap()
        else {
            panic!("expected list");
        };
        assert_eq!(flash, None);
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let (service, store) = service();
        let existing = seed(&store, "Prefilled").await;
        let mut ctx = ctx();

        let outcome = service.edit_form(&mut ctx, Some(existing.id())).await.unwrap();

        match outcome {
            Outcome::Render(Page::Form { record, values, errors }) => {
                assert_eq!(record, Some(existing));
                assert_eq!(values.get("title"), "Prefilled");
                assert!(errors.is_empty());
            }
            other => panic!("expected form, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn show_renders_existing_record() {
        let (service, store) = service();
        let existing = seed(&store, "Visible").await;
        let mut ctx = ctx();

        let outcome = service.show(&mut ctx, Some(existing.id())).await.unwrap();

        assert_eq!(outcome, Outcome::Render(Page::Detail { record: existing }));
        assert_eq!(ctx.flash(), None);
    }

    #[tokio::test]
    async fn show_of_unknown_record_redirects() {
        let (service, _store) = service();
        let mut ctx = ctx();

        let outcome = service.show(&mut ctx, Some(RecordId::new(5))).await.unwrap();

        assert_eq!(outcome, Outcome::RedirectToList);
        assert_eq!(ctx.flash(), Some(NOT_FOUND));
    }

    #[tokio::test]
    async fn create_form_uses_entity_defaults() {
        let store = MockRecordStore::<Project>::new();
        let service = RecordServiceImpl::new(Arc::new(store));

        let Outcome::Render(Page::Form { values, record, .. }) = service.create_form() else {
            panic!("expected form");
        };
        assert!(record.is_none());
        assert_eq!(values.get("status"), "planned");
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let store = MockRecordStore::<Task>::new().failing();
        let service = RecordServiceImpl::new(Arc::new(store));
        let mut ctx = RequestContext::new(CsrfToken::new(TOKEN), Some("kept".into()));

        assert!(matches!(
            service.index(&mut ctx).await,
            Err(RecordError::Storage(_))
        ));
        assert_eq!(ctx.flash(), Some("kept"));
    }
}
