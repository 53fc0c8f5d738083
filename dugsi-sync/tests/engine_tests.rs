use async_trait::async_trait;
use dugsi_store::{DurableStore, MemoryStore, RecordStore};
use dugsi_sync::remote::RemoteReplica;
use dugsi_sync::{SyncEngine, SyncError, SyncResult, TableOutcome};
use dugsi_types::{Record, TableId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

/// Replica scripted per table: canned fetch results, optional failures,
/// and a log of every upsert it receives.
#[derive(Default)]
struct ScriptedReplica {
    tables: HashMap<TableId, Vec<Record>>,
    fail_fetch: HashSet<TableId>,
    fail_upsert: HashSet<TableId>,
    upserts: Mutex<Vec<(TableId, Vec<Record>)>>,
}

impl ScriptedReplica {
    fn with_table(mut self, table: TableId, records: Vec<Record>) -> Self {
        self.tables.insert(table, records);
        self
    }

    fn failing_fetch(mut self, table: TableId) -> Self {
        self.fail_fetch.insert(table);
        self
    }

    fn failing_upsert(mut self, table: TableId) -> Self {
        self.fail_upsert.insert(table);
        self
    }

    fn upserts_for(&self, table: TableId) -> Vec<Vec<Record>> {
        self.upserts
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == table)
            .map(|(_, records)| records.clone())
            .collect()
    }
}

#[async_trait]
impl RemoteReplica for ScriptedReplica {
    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    async fn check_connection(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn fetch_table(&self, table: TableId) -> SyncResult<Vec<Record>> {
        if self.fail_fetch.contains(&table) {
            return Err(SyncError::Network(format!("fetch {table} refused")));
        }
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }

    async fn upsert_table(&self, table: TableId, records: &[Record]) -> SyncResult<()> {
        self.upserts
            .lock()
            .unwrap()
            .push((table, records.to_vec()));
        if self.fail_upsert.contains(&table) {
            return Err(SyncError::PermissionDenied(format!("upsert {table} rejected")));
        }
        Ok(())
    }
}

fn engine_with(
    local: &[(TableId, Vec<Record>)],
    replica: ScriptedReplica,
) -> (Arc<SyncEngine>, Arc<ScriptedReplica>, Arc<MemoryStore>) {
    let durable = Arc::new(MemoryStore::new());
    for (table, records) in local {
        durable.set(*table, records).unwrap();
    }
    let store = Arc::new(RecordStore::open(durable.clone()).unwrap());
    let replica = Arc::new(replica);
    let engine = Arc::new(SyncEngine::new(store, replica.clone()));
    (engine, replica, durable)
}

fn rec(id: &str, a: i64) -> Record {
    Record::new(id).with("a", a)
}

// ── Full pass behavior ──────────────────────────────────────────

#[tokio::test]
async fn identical_replicas_sync_clean_with_no_writes() {
    let records = vec![rec("A", 1)];
    let (engine, replica, _) = engine_with(
        &[(TableId::Students, records.clone())],
        ScriptedReplica::default().with_table(TableId::Students, records),
    );

    let report = engine.sync_all().await.unwrap();
    assert!(report.is_clean());
    assert!(!report.has_changes());
    assert!(replica.upserts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn remote_update_is_installed_locally() {
    let (engine, _, durable) = engine_with(
        &[(TableId::Students, vec![rec("A", 1)])],
        ScriptedReplica::default().with_table(TableId::Students, vec![rec("A", 2)]),
    );

    let report = engine.sync_all().await.unwrap();
    assert_eq!(report.changed_tables(), vec![TableId::Students]);

    // Both the in-memory table and the durable mirror hold the remote
    // version now.
    let stored = durable.get(TableId::Students).unwrap();
    assert_eq!(stored[0].get("a"), Some(&serde_json::json!(2)));
    let snapshot = engine.store().snapshot(TableId::Students);
    assert_eq!(snapshot[0].get("a"), Some(&serde_json::json!(2)));
}

#[tokio::test]
async fn local_only_record_is_pushed_back() {
    let (engine, replica, _) = engine_with(
        &[(TableId::Teachers, vec![rec("t1", 1), rec("t2", 2)])],
        ScriptedReplica::default().with_table(TableId::Teachers, vec![rec("t1", 1)]),
    );

    let report = engine.sync_all().await.unwrap();
    assert!(report.has_changes());

    let pushed = replica.upserts_for(TableId::Teachers);
    assert_eq!(pushed.len(), 1);
    let pushed_ids: Vec<_> = pushed[0].iter().filter_map(Record::id).collect();
    assert_eq!(pushed_ids, vec!["t1", "t2"]);
}

#[tokio::test]
async fn fetch_failure_skips_only_that_table() {
    let (engine, _, _) = engine_with(
        &[
            (TableId::Students, vec![rec("A", 1)]),
            (TableId::Finance, vec![rec("f1", 1)]),
        ],
        ScriptedReplica::default()
            .with_table(TableId::Students, vec![rec("A", 2)])
            .with_table(TableId::Teachers, vec![rec("t1", 1)])
            .with_table(TableId::Attendance, vec![rec("at1", 1)])
            .with_table(TableId::Exams, vec![rec("e1", 1)])
            .failing_fetch(TableId::Finance),
    );

    let report = engine.sync_all().await.unwrap();

    // Finance failed, the other four tables still reconciled.
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, TableId::Finance);
    assert!(matches!(failures[0].1, SyncError::Network(_)));

    let mut changed = report.changed_tables();
    changed.sort_by_key(|t| t.as_str());
    assert_eq!(
        changed,
        vec![
            TableId::Attendance,
            TableId::Exams,
            TableId::Students,
            TableId::Teachers,
        ]
    );

    // The failed table's local snapshot is untouched.
    let finance = engine.store().snapshot(TableId::Finance);
    assert_eq!(finance.len(), 1);
    assert_eq!(finance[0].get("a"), Some(&serde_json::json!(1)));
}

#[tokio::test]
async fn upsert_failure_is_surfaced_but_local_merge_stands() {
    let (engine, _, durable) = engine_with(
        &[(TableId::Exams, vec![rec("e1", 1), rec("e2", 2)])],
        ScriptedReplica::default()
            .with_table(TableId::Exams, vec![rec("e1", 9)])
            .failing_upsert(TableId::Exams),
    );

    let report = engine.sync_all().await.unwrap();
    assert!(!report.is_clean());
    let (table, outcome) = &report.outcomes()[4];
    assert_eq!(*table, TableId::Exams);
    assert!(matches!(
        outcome,
        TableOutcome::PushFailed { records: 2, error: SyncError::PermissionDenied(_) }
    ));

    // Local durability is not rolled back: the merged table (remote-won
    // e1, local-only e2) is persisted.
    let stored = durable.get(TableId::Exams).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].get("a"), Some(&serde_json::json!(9)));
}

#[tokio::test]
async fn empty_remote_tables_pull_nothing_and_push_local() {
    let (engine, replica, _) = engine_with(
        &[(TableId::Attendance, vec![rec("at1", 1)])],
        ScriptedReplica::default(),
    );

    let report = engine.sync_all().await.unwrap();
    assert_eq!(report.changed_tables(), vec![TableId::Attendance]);
    assert_eq!(replica.upserts_for(TableId::Attendance).len(), 1);
    // Tables empty on both sides stay untouched.
    assert!(replica.upserts_for(TableId::Students).is_empty());
}

// ── Bulk upload ─────────────────────────────────────────────────

#[tokio::test]
async fn push_all_uploads_non_empty_tables_only() {
    let (engine, replica, _) = engine_with(
        &[
            (TableId::Students, vec![rec("A", 1)]),
            (TableId::Finance, vec![rec("f1", 1)]),
        ],
        ScriptedReplica::default(),
    );

    let report = engine.push_all().await.unwrap();
    assert!(report.is_clean());

    let mut changed = report.changed_tables();
    changed.sort_by_key(|t| t.as_str());
    assert_eq!(changed, vec![TableId::Finance, TableId::Students]);
    assert!(replica.upserts_for(TableId::Teachers).is_empty());
}

#[tokio::test]
async fn push_all_reports_rejected_uploads() {
    let (engine, _, _) = engine_with(
        &[(TableId::Students, vec![rec("A", 1)])],
        ScriptedReplica::default().failing_upsert(TableId::Students),
    );

    let report = engine.push_all().await.unwrap();
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].1, SyncError::PermissionDenied(_)));
}

// ── Overlap guard ───────────────────────────────────────────────

/// Replica whose fetches block until released, to hold a pass open.
struct BlockingReplica {
    entered: mpsc::Sender<()>,
    release: watch::Receiver<bool>,
}

#[async_trait]
impl RemoteReplica for BlockingReplica {
    fn provider_name(&self) -> &'static str {
        "blocking"
    }

    async fn check_connection(&self) -> SyncResult<()> {
        Ok(())
    }

    async fn fetch_table(&self, _table: TableId) -> SyncResult<Vec<Record>> {
        let _ = self.entered.try_send(());
        let mut release = self.release.clone();
        while !*release.borrow() {
            if release.changed().await.is_err() {
                break;
            }
        }
        Ok(Vec::new())
    }

    async fn upsert_table(&self, _table: TableId, _records: &[Record]) -> SyncResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn concurrent_pass_is_rejected_while_one_is_in_flight() {
    let (entered_tx, mut entered_rx) = mpsc::channel(8);
    let (release_tx, release_rx) = watch::channel(false);
    let store = Arc::new(RecordStore::open(MemoryStore::new()).unwrap());
    let engine = Arc::new(SyncEngine::new(
        store,
        Arc::new(BlockingReplica {
            entered: entered_tx,
            release: release_rx,
        }),
    ));

    let background = tokio::spawn({
        let engine = engine.clone();
        async move { engine.sync_all().await }
    });

    // Wait until the first pass is inside a fetch, then try to start
    // another one.
    entered_rx.recv().await.unwrap();
    assert!(matches!(
        engine.sync_all().await.unwrap_err(),
        SyncError::SyncInProgress
    ));
    assert!(matches!(
        engine.push_all().await.unwrap_err(),
        SyncError::SyncInProgress
    ));

    release_tx.send(true).unwrap();
    let report = background.await.unwrap().unwrap();
    assert!(report.is_clean());

    // Guard released: the next pass is admitted again.
    assert!(engine.sync_all().await.is_ok());
}
