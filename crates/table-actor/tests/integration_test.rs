use table_actor::{TableActor, TableError, TableRecord};

// --- Test Record ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    show: String,
    seat: Option<u32>,
    void: bool,
}

#[derive(Debug)]
struct TicketInsert {
    show: String,
}

#[derive(Debug)]
enum TicketPatch {
    Seat(u32),
    Void,
}

#[derive(Debug, thiserror::Error)]
#[error("ticket is void")]
struct VoidTicket;

impl TableRecord for Ticket {
    type Id = u32;
    type Partition = String;
    type Insert = TicketInsert;
    type Patch = TicketPatch;
    type Error = VoidTicket;

    fn from_insert(id: u32, params: TicketInsert) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            show: params.show,
            seat: None,
            void: false,
        })
    }

    fn partition(&self) -> &String {
        &self.show
    }

    fn apply(&mut self, patch: &TicketPatch) -> Result<bool, Self::Error> {
        match patch {
            TicketPatch::Seat(_) if self.void => Err(VoidTicket),
            TicketPatch::Seat(seat) => {
                let changed = self.seat != Some(*seat);
                self.seat = Some(*seat);
                Ok(changed)
            }
            TicketPatch::Void => {
                let changed = !self.void;
                self.void = true;
                self.seat = None;
                Ok(changed)
            }
        }
    }
}

async fn insert(client: &table_actor::TableClient<Ticket>, show: &str) -> u32 {
    client
        .insert(TicketInsert { show: show.into() })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_insert_scan_and_partitions() {
    let (actor, client) = TableActor::new(10);
    let handle = tokio::spawn(actor.run());

    let first = insert(&client, "matinee").await;
    let second = insert(&client, "matinee").await;
    insert(&client, "evening").await;
    assert_eq!((first, second), (1, 2));

    let mut matinee = client.scan("matinee".into()).await.unwrap();
    matinee.sort_by_key(|t| t.id);
    assert_eq!(matinee.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);

    assert_eq!(client.scan_all().await.unwrap().len(), 3);
    assert!(client.scan("late".into()).await.unwrap().is_empty());

    let mut shows = client.partitions().await.unwrap();
    shows.sort();
    assert_eq!(shows, vec!["evening".to_string(), "matinee".to_string()]);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_patch_reports_changes_and_rejections() {
    let (actor, client) = TableActor::new(10);
    tokio::spawn(actor.run());

    let id = insert(&client, "matinee").await;
    let seated = client.patch(id, TicketPatch::Seat(4)).await.unwrap();
    assert_eq!(seated.seat, Some(4));

    client.patch(id, TicketPatch::Void).await.unwrap();
    let rejected = client.patch(id, TicketPatch::Seat(5)).await;
    assert!(matches!(rejected, Err(TableError::Record { .. })));

    let stored = client.get(id).await.unwrap().unwrap();
    assert!(stored.void);
    assert_eq!(stored.seat, None);

    let missing = client.patch(99, TicketPatch::Void).await;
    assert!(matches!(missing, Err(TableError::NotFound(_))));
}

#[tokio::test]
async fn test_patch_many_stops_at_first_failure() {
    let (actor, client) = TableActor::new(10);
    tokio::spawn(actor.run());

    let a = insert(&client, "matinee").await;
    let b = insert(&client, "matinee").await;
    let c = insert(&client, "matinee").await;
    client.patch(b, TicketPatch::Void).await.unwrap();

    let result = client
        .patch_many(vec![
            (a, TicketPatch::Seat(1)),
            (b, TicketPatch::Seat(2)),
            (c, TicketPatch::Seat(3)),
        ])
        .await;
    match result {
        Err(TableError::Aborted { applied, .. }) => assert_eq!(applied, 1),
        other => panic!("expected Aborted, got {:?}", other),
    }

    assert_eq!(client.get(a).await.unwrap().unwrap().seat, Some(1));
    assert_eq!(client.get(c).await.unwrap().unwrap().seat, None);

    let report = client
        .patch_many(vec![(a, TicketPatch::Seat(1)), (c, TicketPatch::Seat(2))])
        .await
        .unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(report.changed, 1);
}

#[tokio::test]
async fn test_closed_table_is_unavailable() {
    let (actor, client) = TableActor::<Ticket>::new(1);
    drop(actor);

    let err = client.scan_all().await.unwrap_err();
    assert!(err.is_unavailable());
}
