use energraph_core::{InMemoryModelStore, Model, ModelObject, ModelStore, StoreError};

fn sample_model() -> Model {
    let mut model = Model::new(ModelObject::new("EnergySystem"));
    let root = model.root();
    model
        .set_child(root, "area", ModelObject::new("Area").with_attr("id", "a1"))
        .unwrap();
    model
}

#[test]
fn open_session_rejects_duplicates() {
    let mut store = InMemoryModelStore::new();
    store.open_session("s1", sample_model()).unwrap();

    let err = store.open_session("s1", sample_model()).unwrap_err();
    assert!(matches!(err, StoreError::SessionExists(session) if session == "s1"));
}

#[test]
fn close_session_unloads_the_model() {
    let mut store = InMemoryModelStore::new();
    store.open_session("s1", sample_model()).unwrap();

    let model = store.close_session("s1").expect("session was loaded");
    assert_eq!(model.len(), 2);
    assert!(store.close_session("s1").is_none());
    assert!(matches!(
        store.model("s1"),
        Err(StoreError::SessionNotFound(_))
    ));
}

#[test]
fn sessions_lists_active_keys() {
    let mut store = InMemoryModelStore::new();
    store.open_session("s1", sample_model()).unwrap();
    store.open_session("s2", sample_model()).unwrap();

    let mut sessions: Vec<&str> = store.sessions().collect();
    sessions.sort_unstable();
    assert_eq!(sessions, ["s1", "s2"]);
}

#[test]
fn root_id_and_fragment_lookups_answer_from_the_session_model() {
    let mut store = InMemoryModelStore::new();
    store.open_session("s1", sample_model()).unwrap();

    let root = store.get_root("s1").unwrap();
    assert_eq!(store.model("s1").unwrap().root(), root);

    let area = store.get_by_id("s1", "a1").unwrap();
    assert_eq!(store.resolve_fragment("s1", "//@area").unwrap(), area);

    assert!(matches!(
        store.get_by_id("s1", "ghost"),
        Err(StoreError::IdNotFound { .. })
    ));
    assert!(matches!(
        store.resolve_fragment("s1", "bad path"),
        Err(StoreError::InvalidFragment { .. })
    ));
}
