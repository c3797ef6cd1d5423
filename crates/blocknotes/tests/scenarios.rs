//! End-to-end scenarios against the public registry surface.

use blocknotes::store::Store;
use blocknotes::{ErrorKind, NoteEvent, NoteId, Visibility};
use blocknotes_testkit::{init_tracing, memory_registry, multi_party_fixtures, Wallet};

#[tokio::test]
async fn three_notes_one_of_each_visibility() -> anyhow::Result<()> {
    init_tracing();
    let parties = multi_party_fixtures(3);
    let (owner, addr1, addr2) = (
        parties[0].principal(),
        parties[1].principal(),
        parties[2].principal(),
    );
    let mut notes = memory_registry();

    let private = notes.create(&owner, "Private note", Visibility::Private).await?;
    let shared = notes.create(&owner, "Shared note", Visibility::Shared).await?;
    let public = notes.create(&owner, "Public note", Visibility::Public).await?;
    assert_eq!(
        (private, shared, public),
        (NoteId::new(1), NoteId::new(2), NoteId::new(3))
    );

    notes.share_with(shared, addr1, &owner).await?;

    let err = notes.read(private, &addr1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let view = notes.read(shared, &addr1).await?;
    assert_eq!(view.content, "Shared note");
    assert_eq!(view.visibility, Visibility::Shared);

    assert_eq!(notes.read(public, &addr2).await?.content, "Public note");

    // addr2 holds no grant on the shared note.
    assert_eq!(
        notes.read(shared, &addr2).await.unwrap_err().kind(),
        ErrorKind::Unauthorized
    );
    Ok(())
}

#[tokio::test]
async fn private_note_ignores_grants() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(2);
    let (owner, friend) = (parties[0].principal(), parties[1].principal());
    let mut notes = memory_registry();

    let id = notes.create(&owner, "diary", Visibility::Private).await?;
    notes.share_with(id, friend, &owner).await?;

    assert!(notes.is_shared_with(id, &friend).await?);
    assert_eq!(
        notes.read(id, &friend).await.unwrap_err().kind(),
        ErrorKind::Unauthorized
    );

    // The grant made while private takes effect once the note is shared.
    notes.change_visibility(id, Visibility::Shared, &owner).await?;
    assert_eq!(notes.read(id, &friend).await?.content, "diary");
    Ok(())
}

#[tokio::test]
async fn grants_survive_visibility_round_trip() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(3);
    let (owner, friend, stranger) = (
        parties[0].principal(),
        parties[1].principal(),
        parties[2].principal(),
    );
    let mut notes = memory_registry();

    let id = notes.create(&owner, "plans", Visibility::Shared).await?;
    notes.share_with(id, friend, &owner).await?;
    assert!(notes.read(id, &friend).await.is_ok());

    notes.change_visibility(id, Visibility::Private, &owner).await?;
    assert!(notes.read(id, &friend).await.is_err());

    notes.change_visibility(id, Visibility::Public, &owner).await?;
    assert!(notes.read(id, &stranger).await.is_ok());

    notes.change_visibility(id, Visibility::Shared, &owner).await?;
    assert!(notes.read(id, &friend).await.is_ok());
    assert!(notes.read(id, &stranger).await.is_err());
    Ok(())
}

#[tokio::test]
async fn sharing_twice_is_a_no_op() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(3);
    let (owner, friend, other) = (
        parties[0].principal(),
        parties[1].principal(),
        parties[2].principal(),
    );
    let mut notes = memory_registry();

    let id = notes.create(&owner, "Shared note", Visibility::Shared).await?;
    notes.share_with(id, friend, &owner).await?;
    notes.share_with(id, friend, &owner).await?;

    let note = notes.store().get_note(id).await?.expect("note exists");
    assert_eq!(note.shared_with.len(), 1);
    assert!(notes.is_shared_with(id, &friend).await?);
    assert!(!notes.is_shared_with(id, &other).await?);
    Ok(())
}

#[tokio::test]
async fn deleted_note_is_gone_for_everyone() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(2);
    let (owner, friend) = (parties[0].principal(), parties[1].principal());
    let mut notes = memory_registry();

    let id = notes.create(&owner, "temporary", Visibility::Public).await?;
    notes.delete_note(id, &owner).await?;

    let kinds = vec![
        notes.read(id, &owner).await.unwrap_err().kind(),
        notes.read(id, &friend).await.unwrap_err().kind(),
        notes.share_with(id, friend, &owner).await.unwrap_err().kind(),
        notes
            .change_visibility(id, Visibility::Private, &owner)
            .await
            .unwrap_err()
            .kind(),
        notes.delete_note(id, &owner).await.unwrap_err().kind(),
        notes.is_shared_with(id, &friend).await.unwrap_err().kind(),
    ];
    assert!(kinds.iter().all(|k| *k == ErrorKind::NotFound));

    // The id is not handed out again.
    let next = notes.create(&owner, "replacement", Visibility::Public).await?;
    assert_eq!(next, NoteId::new(2));

    assert_eq!(
        notes.drain_events(),
        vec![
            NoteEvent::Created {
                id,
                content: "temporary".into(),
                owner,
                visibility: Visibility::Public,
            },
            NoteEvent::Deleted { id },
            NoteEvent::Created {
                id: next,
                content: "replacement".into(),
                owner,
                visibility: Visibility::Public,
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_delete_even_when_shared() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(2);
    let (owner, friend) = (parties[0].principal(), parties[1].principal());
    let mut notes = memory_registry();

    let id = notes.create(&owner, "keep", Visibility::Shared).await?;
    notes.share_with(id, friend, &owner).await?;

    assert_eq!(
        notes.delete_note(id, &friend).await.unwrap_err().kind(),
        ErrorKind::NotOwner
    );
    assert_eq!(notes.read(id, &friend).await?.content, "keep");
    Ok(())
}

#[tokio::test]
async fn unsolicited_transfer_is_refunded() -> anyhow::Result<()> {
    let parties = multi_party_fixtures(1);
    let sender = parties[0].principal();
    let mut wallet = Wallet::new(sender, 10_000);
    let mut notes = memory_registry();

    let fee = 21;
    let amount = wallet.send(1_000, fee).expect("wallet covers the transfer");
    let refund = notes.receive_value(sender, amount);
    wallet.credit(&refund);

    assert_eq!(notes.balance(), 0);
    assert_eq!(wallet.balance(), 10_000 - fee);
    assert!(notes.events().is_empty());
    Ok(())
}
