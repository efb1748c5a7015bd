//! Repository Integration Tests
//!
//! Tests for IconRepository with an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{
        DomainError, Icon, IconKind, ReorderEntry, UserId,
    };
    use crate::repository::{
        open_in_memory, IconHierarchyOperations, IconPositioningOperations, IconRepository,
        IconReorderOperations, OwnedRepository, UserRepository,
    };

    const ALICE: UserId = 1;
    const BOB: UserId = 2;

    fn setup_test_repo() -> IconRepository {
        let conn = open_in_memory().expect("Failed to init test DB");
        IconRepository::new(conn)
    }

    fn link(owner: UserId, title: &str) -> Icon {
        let mut icon = Icon::new(owner, title.to_string(), IconKind::Link);
        icon.url = Some(format!("https://example.com/{}", title));
        icon
    }

    fn folder(owner: UserId, title: &str) -> Icon {
        Icon::new(owner, title.to_string(), IconKind::Folder)
    }

    async fn create_at(
        repo: &IconRepository,
        owner: UserId,
        icon: &mut Icon,
        parent: Option<i64>,
    ) -> Icon {
        icon.parent_id = parent;
        icon.position = repo.next_position(owner, parent).await.expect("next_position");
        repo.create(owner, icon).await.expect("create")
    }

    #[tokio::test]
    async fn test_create_and_find_is_owner_scoped() {
        let repo = setup_test_repo();

        let created = repo.create(ALICE, &link(ALICE, "news")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.owner_id, ALICE);
        assert!(created.created_at.is_some());

        let found = repo.find_by_id(ALICE, created.id).await.unwrap();
        assert_eq!(found.unwrap().title, "news");

        // Another owner sees nothing, not a forbidden error
        let hidden = repo.find_by_id(BOB, created.id).await.unwrap();
        assert!(hidden.is_none());
    }

    #[tokio::test]
    async fn test_positions_allocate_sequentially_per_sibling_set() {
        let repo = setup_test_repo();

        // Root level: 0, 1, 2 in creation order
        for expected in 0..3 {
            let icon = create_at(&repo, ALICE, &mut link(ALICE, "root"), None).await;
            assert_eq!(icon.position, expected);
        }

        // A folder's children restart at 0
        let dir = create_at(&repo, ALICE, &mut folder(ALICE, "dir"), None).await;
        for expected in 0..2 {
            let child = create_at(&repo, ALICE, &mut link(ALICE, "child"), Some(dir.id)).await;
            assert_eq!(child.position, expected);
        }

        // Another owner's root set is independent
        let other = create_at(&repo, BOB, &mut link(BOB, "bob"), None).await;
        assert_eq!(other.position, 0);
    }

    #[tokio::test]
    async fn test_next_position_tolerates_gaps_and_duplicates() {
        let repo = setup_test_repo();

        let mut a = link(ALICE, "a");
        a.position = 3;
        repo.create(ALICE, &a).await.unwrap();

        let mut b = link(ALICE, "b");
        b.position = 7;
        repo.create(ALICE, &b).await.unwrap();

        let mut c = link(ALICE, "c");
        c.position = 7;
        repo.create(ALICE, &c).await.unwrap();

        assert_eq!(repo.next_position(ALICE, None).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_reorder_applies_batch_in_input_order() {
        let repo = setup_test_repo();

        let a = create_at(&repo, ALICE, &mut folder(ALICE, "A"), None).await;
        let b = create_at(&repo, ALICE, &mut folder(ALICE, "B"), None).await;
        assert_eq!((a.position, b.position), (0, 1));

        let updated = repo
            .reorder(
                ALICE,
                &[
                    ReorderEntry { id: a.id, position: 1 },
                    ReorderEntry { id: b.id, position: 0 },
                ],
            )
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!((updated[0].id, updated[0].position), (a.id, 1));
        assert_eq!((updated[1].id, updated[1].position), (b.id, 0));
        assert_eq!(updated[0].title, "A");

        let a2 = repo.find_by_id(ALICE, a.id).await.unwrap().unwrap();
        let b2 = repo.find_by_id(ALICE, b.id).await.unwrap().unwrap();
        assert_eq!((a2.position, b2.position), (1, 0));
    }

    #[tokio::test]
    async fn test_reorder_rejects_malformed_batches() {
        let repo = setup_test_repo();
        let a = create_at(&repo, ALICE, &mut link(ALICE, "a"), None).await;

        let empty = repo.reorder(ALICE, &[]).await.unwrap_err();
        assert!(matches!(empty, DomainError::Validation(_)));

        let negative = repo
            .reorder(ALICE, &[ReorderEntry { id: a.id, position: -1 }])
            .await
            .unwrap_err();
        assert!(matches!(negative, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reorder_missing_id_is_not_found() {
        let repo = setup_test_repo();
        let a = create_at(&repo, ALICE, &mut link(ALICE, "a"), None).await;

        let err = repo
            .reorder(
                ALICE,
                &[
                    ReorderEntry { id: a.id, position: 1 },
                    ReorderEntry { id: 9999, position: 0 },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        // Nothing from the batch was applied
        let a2 = repo.find_by_id(ALICE, a.id).await.unwrap().unwrap();
        assert_eq!(a2.position, 0);
    }

    #[tokio::test]
    async fn test_reorder_foreign_id_rolls_back_whole_batch() {
        let repo = setup_test_repo();

        let mine = create_at(&repo, ALICE, &mut link(ALICE, "mine"), None).await;
        let theirs = create_at(&repo, BOB, &mut link(BOB, "theirs"), None).await;

        let err = repo
            .reorder(
                ALICE,
                &[
                    ReorderEntry { id: mine.id, position: 5 },
                    ReorderEntry { id: theirs.id, position: 6 },
                ],
            )
            .await
            .unwrap_err();

        match err {
            DomainError::Forbidden(msg) => assert!(msg.contains(&theirs.id.to_string())),
            other => panic!("expected Forbidden, got {:?}", other),
        }

        // Neither icon moved, including the caller's own
        let mine2 = repo.find_by_id(ALICE, mine.id).await.unwrap().unwrap();
        let theirs2 = repo.find_by_id(BOB, theirs.id).await.unwrap().unwrap();
        assert_eq!(mine2.position, 0);
        assert_eq!(theirs2.position, 0);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_descendants() {
        let repo = setup_test_repo();

        let top = create_at(&repo, ALICE, &mut folder(ALICE, "top"), None).await;
        let mid = create_at(&repo, ALICE, &mut folder(ALICE, "mid"), Some(top.id)).await;
        let leaf = create_at(&repo, ALICE, &mut link(ALICE, "leaf"), Some(mid.id)).await;
        let outside = create_at(&repo, ALICE, &mut link(ALICE, "outside"), None).await;

        repo.delete(ALICE, top.id).await.unwrap();

        let remaining = repo.list(ALICE).await.unwrap();
        let ids: Vec<i64> = remaining.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![outside.id]);
        assert!(!ids.contains(&mid.id));
        assert!(!ids.contains(&leaf.id));

        // No surviving row references a deleted parent
        for icon in &remaining {
            if let Some(parent) = icon.parent_id {
                assert!(repo.find_by_id(ALICE, parent).await.unwrap().is_some());
            }
        }
    }

    #[tokio::test]
    async fn test_delete_other_owners_icon_is_not_found() {
        let repo = setup_test_repo();
        let icon = create_at(&repo, ALICE, &mut link(ALICE, "a"), None).await;

        let err = repo.delete(BOB, icon.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(repo.find_by_id(ALICE, icon.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_is_owner_scoped_and_refreshes_timestamp() {
        let repo = setup_test_repo();
        let created = create_at(&repo, ALICE, &mut link(ALICE, "old"), None).await;

        let mut changed = created.clone();
        changed.title = "new".to_string();

        let err = repo.update(BOB, &changed).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let updated = repo.update(ALICE, &changed).await.unwrap();
        assert_eq!(updated.title, "new");
        assert!(updated.updated_at >= created.created_at);

        let stored = repo.find_by_id(ALICE, created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "new");
    }

    #[tokio::test]
    async fn test_roots_and_children_listing() {
        let repo = setup_test_repo();

        let dir = create_at(&repo, ALICE, &mut folder(ALICE, "dir"), None).await;
        let root_link = create_at(&repo, ALICE, &mut link(ALICE, "root"), None).await;
        let child = create_at(&repo, ALICE, &mut link(ALICE, "child"), Some(dir.id)).await;
        create_at(&repo, BOB, &mut link(BOB, "bob"), None).await;

        let roots = repo.list_roots(ALICE).await.unwrap();
        let root_ids: Vec<i64> = roots.iter().map(|i| i.id).collect();
        assert_eq!(root_ids, vec![dir.id, root_link.id]);

        let children = repo.list_children(ALICE, dir.id).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child.id);

        // A foreign parent filter yields nothing of the other owner's
        assert!(repo.list_children(BOB, dir.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_parent_folder_rules() {
        let repo = setup_test_repo();

        let dir = create_at(&repo, ALICE, &mut folder(ALICE, "dir"), None).await;
        let plain = create_at(&repo, ALICE, &mut link(ALICE, "plain"), None).await;

        assert_eq!(repo.resolve_parent_folder(ALICE, dir.id).await.unwrap().id, dir.id);

        let non_folder = repo.resolve_parent_folder(ALICE, plain.id).await.unwrap_err();
        assert!(matches!(non_folder, DomainError::Validation(_)));

        let missing = repo.resolve_parent_folder(ALICE, 9999).await.unwrap_err();
        assert!(matches!(missing, DomainError::Validation(_)));

        // A foreign folder reads the same as a missing one
        let foreign = repo.resolve_parent_folder(BOB, dir.id).await.unwrap_err();
        assert!(matches!(foreign, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_cycle_detection_walks_ancestors() {
        let repo = setup_test_repo();

        let top = create_at(&repo, ALICE, &mut folder(ALICE, "top"), None).await;
        let mid = create_at(&repo, ALICE, &mut folder(ALICE, "mid"), Some(top.id)).await;
        let leaf = create_at(&repo, ALICE, &mut folder(ALICE, "leaf"), Some(mid.id)).await;

        assert!(repo.would_create_cycle(ALICE, top.id, leaf.id).await.unwrap());
        assert!(repo.would_create_cycle(ALICE, top.id, top.id).await.unwrap());
        assert!(!repo.would_create_cycle(ALICE, leaf.id, top.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_descendants_walk() {
        let repo = setup_test_repo();

        let top = create_at(&repo, ALICE, &mut folder(ALICE, "top"), None).await;
        let mid = create_at(&repo, ALICE, &mut folder(ALICE, "mid"), Some(top.id)).await;
        let leaf = create_at(&repo, ALICE, &mut link(ALICE, "leaf"), Some(mid.id)).await;
        create_at(&repo, ALICE, &mut link(ALICE, "other"), None).await;

        let mut ids: Vec<i64> = repo
            .get_descendants(ALICE, top.id)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![mid.id, leaf.id]);
    }

    #[tokio::test]
    async fn test_user_registration_conflict() {
        let conn = open_in_memory().expect("Failed to init test DB");
        let users = UserRepository::new(conn);

        let alice = users.create("alice@example.com", "Alice").await.unwrap();
        assert!(alice.id > 0);
        assert_eq!(
            users.find_by_email("alice@example.com").await.unwrap().unwrap().id,
            alice.id
        );

        let dup = users.create("alice@example.com", "Imposter").await.unwrap_err();
        assert!(matches!(dup, DomainError::Conflict(_)));
    }
}
