use petcare_store::storage::{Collection, read_collection};
use petcare_store::{CollectionStore, Config, RedbStore, StoreState};
use shared::models::{Hotel, HotelCreate, ReservationStatus};

fn config_in(dir: &std::path::Path) -> Config {
    let mut config = Config::with_work_dir(dir.to_string_lossy());
    config.db_file = "petcare.redb".to_string();
    config.strict_transitions = false;
    config
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let reservation_id = {
        let state = StoreState::open(&config).unwrap();
        let summary = state.seeder().seed_demo_data().unwrap();
        state
            .reservations
            .change_status(
                &summary.reservation.id,
                ReservationStatus::Rejected,
                Some("No vacancy"),
            )
            .unwrap();
        summary.reservation.id
    };

    let state = StoreState::open(&config).unwrap();
    let r = state.reservations.get(&reservation_id).unwrap();
    assert_eq!(r.status, ReservationStatus::Rejected);
    assert_eq!(r.status_note.as_deref(), Some("No vacancy"));
    assert!(!state.seeder().seed_if_empty().unwrap());
}

#[test]
fn test_stored_layout_is_camel_case_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbStore::open(dir.path().join("petcare.redb")).unwrap();
    let state = StoreState::with_store(std::sync::Arc::new(store.clone()), Default::default());

    state
        .hotels
        .create(HotelCreate {
            name: "Hotel PetCare BH".to_string(),
            capacity: Some(5),
            ..Default::default()
        })
        .unwrap();

    let raw = store.get(Collection::Hotels.key()).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let hotels = json.as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0]["name"], "Hotel PetCare BH");
    assert!(hotels[0]["createdAt"].is_string());

    let typed: Vec<Hotel> = read_collection(&store, Collection::Hotels.key());
    assert_eq!(typed.len(), 1);
}

fn put(store: &RedbStore, collection: Collection, value: serde_json::Value) {
    store
        .set(collection.key(), &serde_json::to_vec(&value).unwrap())
        .unwrap();
}

#[test]
fn test_legacy_records_are_readable() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbStore::open(dir.path().join("petcare.redb")).unwrap();

    // Older shapes: clear-text password, numeric phone, `tutor` role,
    // `tutorId` owners and `rejectionReason`
    put(
        &store,
        Collection::Users,
        serde_json::json!([{
            "id": "u1",
            "name": "Ana Martins",
            "password": "123",
            "phone": 31999990000u64,
            "role": "tutor"
        }]),
    );
    put(
        &store,
        Collection::Pets,
        serde_json::json!([{
            "id": "p1",
            "tutorId": "u1",
            "name": "Max",
            "species": "Dog",
            "age": 3,
            "obs": null,
            "createdAt": "2025-11-01T10:00:00.000Z",
            "updatedAt": null
        }]),
    );
    put(
        &store,
        Collection::Reservations,
        serde_json::json!([{
            "id": "r1",
            "petId": "p1",
            "tutorId": "u1",
            "hotelId": "h1",
            "checkinDate": "2025-11-10",
            "checkoutDate": "2025-11-12",
            "status": "REJECTED",
            "notes": null,
            "rejectionReason": "No vacancy",
            "createdAt": "2025-11-01T10:00:00.000Z",
            "updatedAt": null
        }]),
    );

    let state = StoreState::with_store(std::sync::Arc::new(store), Default::default());
    let user = state.users.get("u1").unwrap();
    assert_eq!(user.role, shared::models::Role::Guardian);
    assert_eq!(user.phone.as_deref(), Some("31999990000"));
    assert_eq!(state.pets.list_by_user("u1").len(), 1);
    let reservation = state.reservations.get("r1").unwrap();
    assert_eq!(reservation.user_id, "u1");
    assert_eq!(reservation.status_note.as_deref(), Some("No vacancy"));

    // A clear-text password is not a usable hash
    assert!(state.auth().login("", "123").is_err());

    // Writing next to legacy records keeps them
    state
        .users
        .create(shared::models::UserCreate {
            name: "Bruno Lima".to_string(),
            email: "bruno@example.com".to_string(),
            password: "petcare".to_string(),
            ..Default::default()
        })
        .unwrap();
    state
        .pets
        .create(shared::models::PetCreate {
            user_id: "u1".to_string(),
            name: "Luna".to_string(),
            species: "Cat".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert!(state.users.get("u1").is_some());
    assert_eq!(state.users.list().len(), 2);
    assert_eq!(state.pets.list_by_user("u1").len(), 2);

    // Rewritten records use the current keys
    let raw = state.store.get(Collection::Pets.key()).unwrap().unwrap();
    let pets: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(pets[0]["userId"], "u1");
    assert!(pets[0].get("tutorId").is_none());
}

#[test]
fn test_corrupt_collection_reads_empty_and_can_be_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbStore::open(dir.path().join("petcare.redb")).unwrap();
    store.set(Collection::Pets.key(), b"{broken").unwrap();

    let state = StoreState::with_store(std::sync::Arc::new(store), Default::default());
    assert!(state.pets.list().is_empty());

    state
        .pets
        .create(shared::models::PetCreate {
            user_id: "u1".to_string(),
            name: "Max".to_string(),
            species: "Dog".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(state.pets.list().len(), 1);
}
