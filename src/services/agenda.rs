use crate::{
    db::AgendaStore,
    error::{AppError, AppResult},
    models::{Agenda, SaveOutcome},
};

/// Adds a talk to the user's agenda
///
/// Saving a talk twice is reported as [`SaveOutcome::AlreadySaved`], not an error.
pub async fn add_talk(store: &dyn AgendaStore, user_id: i64, talk_id: i64) -> AppResult<SaveOutcome> {
    if !store.talk_exists(talk_id).await? {
        return Err(AppError::NotFound(format!("Talk {} does not exist", talk_id)));
    }

    let outcome = if store.insert_saved_talk(user_id, talk_id).await? {
        SaveOutcome::Added
    } else {
        SaveOutcome::AlreadySaved
    };

    tracing::info!(user_id, talk_id, ?outcome, "Talk saved to agenda");
    Ok(outcome)
}

/// Adds an exhibitor to the user's agenda
pub async fn add_exhibitor(
    store: &dyn AgendaStore,
    user_id: i64,
    exhibitor_id: i64,
) -> AppResult<SaveOutcome> {
    if !store.exhibitor_exists(exhibitor_id).await? {
        return Err(AppError::NotFound(format!(
            "Exhibitor {} does not exist",
            exhibitor_id
        )));
    }

    let outcome = if store.insert_saved_exhibitor(user_id, exhibitor_id).await? {
        SaveOutcome::Added
    } else {
        SaveOutcome::AlreadySaved
    };

    tracing::info!(user_id, exhibitor_id, ?outcome, "Exhibitor saved to agenda");
    Ok(outcome)
}

/// Removes a talk from the agenda; returns whether it was there
pub async fn remove_talk(store: &dyn AgendaStore, user_id: i64, talk_id: i64) -> AppResult<bool> {
    let removed = store.delete_saved_talk(user_id, talk_id).await?;
    tracing::info!(user_id, talk_id, removed, "Talk removed from agenda");
    Ok(removed)
}

/// Removes an exhibitor from the agenda; returns whether it was there
pub async fn remove_exhibitor(
    store: &dyn AgendaStore,
    user_id: i64,
    exhibitor_id: i64,
) -> AppResult<bool> {
    let removed = store.delete_saved_exhibitor(user_id, exhibitor_id).await?;
    tracing::info!(user_id, exhibitor_id, removed, "Exhibitor removed from agenda");
    Ok(removed)
}

/// The user's saved talks and exhibitors, optionally for one event only
pub async fn get_agenda(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<Agenda> {
    let (talks, exhibitors) = tokio::try_join!(
        store.saved_talks(user_id, event_id),
        store.saved_exhibitors(user_id, event_id),
    )?;

    Ok(Agenda {
        event_id,
        talks,
        exhibitors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockAgendaStore;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_add_talk_new() {
        let mut store = MockAgendaStore::new();
        store.expect_talk_exists().with(eq(3)).returning(|_| Ok(true));
        store
            .expect_insert_saved_talk()
            .with(eq(1), eq(3))
            .times(1)
            .returning(|_, _| Ok(true));

        assert_eq!(add_talk(&store, 1, 3).await.unwrap(), SaveOutcome::Added);
    }

    #[tokio::test]
    async fn test_add_talk_twice_is_reported() {
        let mut store = MockAgendaStore::new();
        store.expect_talk_exists().returning(|_| Ok(true));
        store.expect_insert_saved_talk().returning(|_, _| Ok(false));

        assert_eq!(add_talk(&store, 1, 3).await.unwrap(), SaveOutcome::AlreadySaved);
    }

    #[tokio::test]
    async fn test_add_unknown_talk_is_not_found() {
        let mut store = MockAgendaStore::new();
        store.expect_talk_exists().returning(|_| Ok(false));
        store.expect_insert_saved_talk().never();

        let err = add_talk(&store, 1, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_talk_deleted_before_insert_is_not_found() {
        let mut store = MockAgendaStore::new();
        store.expect_talk_exists().returning(|_| Ok(true));
        store
            .expect_insert_saved_talk()
            .returning(|_, talk_id| Err(AppError::NotFound(format!("Talk {} does not exist", talk_id))));

        let err = add_talk(&store, 1, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_exhibitor_outcomes() {
        let mut store = MockAgendaStore::new();
        store.expect_exhibitor_exists().returning(|id| Ok(id != 99));
        store
            .expect_insert_saved_exhibitor()
            .returning(|_, exhibitor_id| Ok(exhibitor_id == 4));

        assert_eq!(add_exhibitor(&store, 1, 4).await.unwrap(), SaveOutcome::Added);
        assert_eq!(
            add_exhibitor(&store, 1, 5).await.unwrap(),
            SaveOutcome::AlreadySaved
        );
        assert!(matches!(
            add_exhibitor(&store, 1, 99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let mut store = MockAgendaStore::new();
        store.expect_delete_saved_talk().returning(|_, _| Ok(false));
        store.expect_delete_saved_exhibitor().returning(|_, _| Ok(true));

        assert!(!remove_talk(&store, 1, 3).await.unwrap());
        assert!(remove_exhibitor(&store, 1, 3).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_agenda_scoped() {
        let mut store = MockAgendaStore::new();
        store
            .expect_saved_talks()
            .with(eq(1), eq(Some(2)))
            .returning(|_, _| Ok(Vec::new()));
        store
            .expect_saved_exhibitors()
            .with(eq(1), eq(Some(2)))
            .returning(|_, _| Ok(Vec::new()));

        let agenda = get_agenda(&store, 1, Some(2)).await.unwrap();
        assert_eq!(agenda.event_id, Some(2));
        assert!(agenda.talks.is_empty());
    }
}
