use std::collections::BTreeSet;

use crate::{
    db::AgendaStore,
    error::{AppError, AppResult},
    models::{Event, EventDetail},
};

/// Lists every event, dated ones first
pub async fn list_events(store: &dyn AgendaStore) -> AppResult<Vec<Event>> {
    store.events().await
}

/// An event with its talks and exhibitors
///
/// With a `user_id`, also reports which of them the user has saved.
pub async fn get_event_detail(
    store: &dyn AgendaStore,
    event_id: i64,
    user_id: Option<i64>,
) -> AppResult<EventDetail> {
    let event = store
        .event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

    let (talks, exhibitors) = tokio::try_join!(
        store.event_talks(event_id),
        store.event_exhibitors(event_id),
    )?;

    let (saved_talk_ids, saved_exhibitor_ids): (BTreeSet<i64>, BTreeSet<i64>) = match user_id {
        Some(user_id) => {
            let (talk_ids, exhibitor_ids) = tokio::try_join!(
                store.saved_talk_ids(user_id),
                store.saved_exhibitor_ids(user_id),
            )?;
            // Only flag items that belong to this event
            (
                talks
                    .iter()
                    .map(|t| t.id)
                    .filter(|id| talk_ids.contains(id))
                    .collect(),
                exhibitors
                    .iter()
                    .map(|e| e.id)
                    .filter(|id| exhibitor_ids.contains(id))
                    .collect(),
            )
        }
        None => (BTreeSet::new(), BTreeSet::new()),
    };

    Ok(EventDetail {
        event,
        talks,
        exhibitors,
        saved_talk_ids,
        saved_exhibitor_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockAgendaStore, models::Talk};
    use std::collections::HashSet;

    fn event(id: i64) -> Event {
        Event {
            id,
            name: "Advanced Factories".to_string(),
            start_date: Some("2025-04-08".to_string()),
            end_date: None,
            location: Some("Barcelona".to_string()),
            description: None,
        }
    }

    fn talk(id: i64) -> Talk {
        Talk {
            id,
            title: format!("Talk {}", id),
            description: None,
            track: None,
            start_time: None,
            end_time: None,
            location: None,
            event_id: Some(1),
        }
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let mut store = MockAgendaStore::new();
        store.expect_event().returning(|_| Ok(None));

        let err = get_event_detail(&store, 9, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_detail_flags_saved_items_of_this_event() {
        let mut store = MockAgendaStore::new();
        store.expect_event().returning(|id| Ok(Some(event(id))));
        store
            .expect_event_talks()
            .returning(|_| Ok(vec![talk(1), talk(2)]));
        store.expect_event_exhibitors().returning(|_| Ok(Vec::new()));
        store
            .expect_saved_talk_ids()
            .returning(|_| Ok(HashSet::from([2, 40])));
        store
            .expect_saved_exhibitor_ids()
            .returning(|_| Ok(HashSet::from([7])));

        let detail = get_event_detail(&store, 1, Some(5)).await.unwrap();
        assert_eq!(detail.talks.len(), 2);
        assert_eq!(detail.saved_talk_ids, BTreeSet::from([2]));
        assert!(detail.saved_exhibitor_ids.is_empty());
    }

    #[tokio::test]
    async fn test_detail_without_user_skips_saved_lookup() {
        let mut store = MockAgendaStore::new();
        store.expect_event().returning(|id| Ok(Some(event(id))));
        store.expect_event_talks().returning(|_| Ok(Vec::new()));
        store.expect_event_exhibitors().returning(|_| Ok(Vec::new()));
        store.expect_saved_talk_ids().never();

        let detail = get_event_detail(&store, 1, None).await.unwrap();
        assert!(detail.saved_talk_ids.is_empty());
    }
}
