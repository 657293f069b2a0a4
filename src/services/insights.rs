use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::chat_message::ChatMessage;
use crate::models::check_in::CheckIn;
use crate::models::journal_entry::JournalEntry;
use crate::services::store::ActivityStore;

const CHECK_IN_LIMIT: i64 = 30;
const JOURNAL_LIMIT: i64 = 20;
const CHAT_LIMIT: i64 = 40;

/// The most recent slice of each activity collection, newest first.
#[derive(Debug, Clone, Default)]
pub struct UserInsights {
    pub check_ins: Vec<CheckIn>,
    pub journal_entries: Vec<JournalEntry>,
    pub chat_messages: Vec<ChatMessage>,
}

impl UserInsights {
    /// Latest of the three head-of-list timestamps, or `None` with no activity.
    pub fn latest_activity(&self) -> Option<DateTime<Utc>> {
        [
            self.check_ins.first().map(|c| c.date),
            self.journal_entries.first().map(|j| j.date),
            self.chat_messages.first().map(|m| m.timestamp),
        ]
        .into_iter()
        .flatten()
        .max()
    }
}

/// Runs the three reads concurrently; any failure fails the whole load.
pub async fn load_user_insights(
    store: &dyn ActivityStore,
    user_id: Uuid,
) -> anyhow::Result<UserInsights> {
    let (check_ins, journal_entries, chat_messages) = tokio::try_join!(
        store.check_ins(user_id, Some(CHECK_IN_LIMIT)),
        store.journal_entries(user_id, Some(JOURNAL_LIMIT)),
        store.chat_messages(user_id, Some(CHAT_LIMIT)),
    )?;

    Ok(UserInsights {
        check_ins,
        journal_entries,
        chat_messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat_message::ChatRole;
    use crate::services::memory::MemoryStore;
    use chrono::Duration;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn caps_each_collection() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        let now = Utc::now();
        for i in 0..45 {
            let at = now - Duration::hours(i);
            store.add_check_in(user, "Happy", at);
            store.add_journal_entry(user, "Neutral", at);
            store.add_chat_message(user, ChatRole::User, "hi", at);
        }

        let insights = load_user_insights(&store, user).await.unwrap();

        assert_eq!(insights.check_ins.len(), 30);
        assert_eq!(insights.journal_entries.len(), 20);
        assert_eq!(insights.chat_messages.len(), 40);
        assert_eq!(insights.check_ins[0].date, now);
    }

    #[tokio::test]
    async fn other_users_rows_are_invisible() {
        let store = MemoryStore::default();
        let user = Uuid::new_v4();
        store.add_check_in(Uuid::new_v4(), "Sad", Utc::now());

        let insights = load_user_insights(&store, user).await.unwrap();

        assert!(insights.check_ins.is_empty());
        assert_eq!(insights.latest_activity(), None);
    }

    #[tokio::test]
    async fn read_failure_fails_the_load() {
        let store = MemoryStore::default();
        store.fail_reads.store(true, Ordering::SeqCst);

        assert!(load_user_insights(&store, Uuid::new_v4()).await.is_err());
    }

    #[test]
    fn latest_activity_takes_max_across_collections() {
        let user = Uuid::new_v4();
        let store = MemoryStore::default();
        let base = Utc::now() - Duration::days(3);
        store.add_check_in(user, "Happy", base);
        store.add_journal_entry(user, "Happy", base + Duration::hours(5));
        store.add_chat_message(user, ChatRole::Assistant, "ok", base + Duration::hours(2));

        let insights = store.snapshot(user);
        assert_eq!(insights.latest_activity(), Some(base + Duration::hours(5)));
    }
}
