use adsorbase_core::{
    Adsorbate, Adsorbent, AdsorbentType, AdsorptionDatabase, DatabaseError, Store,
};

#[test]
fn adsorbate_round_trips_with_all_fields() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let adsorbate = Adsorbate::new("Carbon Dioxide", Some("CO2".to_string()));
    db.register_adsorbate(&adsorbate).unwrap();

    let loaded = db.get_adsorbate("Carbon Dioxide").unwrap();
    assert_eq!(loaded, adsorbate);
}

#[test]
fn unset_optional_fields_stay_unset() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    db.register_adsorbate(&Adsorbate::new("Helium", None)).unwrap();

    let loaded = db.get_adsorbate("Helium").unwrap();
    assert_eq!(loaded.chemical_formula, None);
}

#[test]
fn adsorbent_round_trips_with_optional_properties() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let mut adsorbent = Adsorbent::new(AdsorbentType::ActivatedCarbon, "Calgon-F400");
    adsorbent.manufacturer = Some("Calgon".to_string());
    adsorbent.density = Some(0.85);
    adsorbent.pellet_size = Some(1.2);
    db.register_adsorbent(&adsorbent).unwrap();

    let loaded = db.get_adsorbent("Calgon-F400").unwrap();
    assert_eq!(loaded, adsorbent);
    assert_eq!(loaded.void_volume, None);
}

#[test]
fn re_registration_overwrites_and_clears_stale_fields() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    db.register_adsorbate(&Adsorbate::new("Methane", Some("CH4".to_string())))
        .unwrap();
    // Second registration under the same name drops the formula; the old
    // attribute must not survive the upsert.
    db.register_adsorbate(&Adsorbate::new("Methane", None)).unwrap();

    let loaded = db.get_adsorbate("Methane").unwrap();
    assert_eq!(loaded.chemical_formula, None);

    assert_eq!(db.list_adsorbates().unwrap(), vec!["Methane".to_string()]);
}

#[test]
fn get_missing_record_is_not_found() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let err = db.get_adsorbate("Xenon").unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::NotFound { kind: "adsorbate", ref name } if name == "Xenon"
    ));

    let err = db.get_adsorbent("MOF-5").unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { kind: "adsorbent", .. }));

    let err = db.get_experiment("Sudi").unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { kind: "experiment", .. }));
}

#[test]
fn listing_empty_collections_yields_no_names() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    assert!(db.list_adsorbates().unwrap().is_empty());
    assert!(db.list_adsorbents().unwrap().is_empty());
    assert!(db.list_experiments().unwrap().is_empty());
}

#[test]
fn listings_follow_store_enumeration_order() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    db.register_adsorbate(&Adsorbate::new("Nitrogen", Some("N2".to_string())))
        .unwrap();
    db.register_adsorbate(&Adsorbate::new("Carbon Dioxide", Some("CO2".to_string())))
        .unwrap();
    db.register_adsorbate(&Adsorbate::new("Methane", Some("CH4".to_string())))
        .unwrap();

    assert_eq!(
        db.list_adsorbates().unwrap(),
        vec![
            "Carbon Dioxide".to_string(),
            "Methane".to_string(),
            "Nitrogen".to_string()
        ]
    );
}

#[test]
fn remove_adsorbate_reports_whether_it_existed() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    db.register_adsorbate(&Adsorbate::new("Methane", Some("CH4".to_string())))
        .unwrap();

    assert!(db.remove_adsorbate("Methane").unwrap());
    assert!(!db.remove_adsorbate("Methane").unwrap());
    assert!(db.list_adsorbates().unwrap().is_empty());
}
