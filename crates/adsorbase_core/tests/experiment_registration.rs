use adsorbase_core::{
    Adsorbate, Adsorbent, AdsorbentType, AdsorptionDatabase, Experiment, ExperimentType,
    IsothermType, MixIsotherm, MonoIsotherm, Store,
};
use ndarray::{Array1, Array2};

fn co2() -> Adsorbate {
    Adsorbate::new("Carbon Dioxide", Some("CO2".to_string()))
}

fn ch4() -> Adsorbate {
    Adsorbate::new("Methane", Some("CH4".to_string()))
}

fn calgon() -> Adsorbent {
    let mut adsorbent = Adsorbent::new(AdsorbentType::ActivatedCarbon, "Calgon-F400");
    adsorbent.density = Some(0.85);
    adsorbent
}

fn mono(name: &str, adsorbate: Adsorbate) -> MonoIsotherm {
    MonoIsotherm::new(
        name,
        IsothermType::Excess,
        318.2,
        adsorbate,
        Array1::linspace(0.0, 9.0, 10),
        Array1::linspace(20.0, 50.0, 10),
        None,
        None,
    )
    .unwrap()
}

fn sudi_experiment() -> Experiment {
    let mut experiment = Experiment::new("Sudi", ExperimentType::Volumetric, 318.2, calgon());
    experiment.monocomponent_isotherms = vec![mono("CO2-01", co2()), mono("CH4-01", ch4())];
    experiment.mixture_isotherms = vec![MixIsotherm::new(
        "CO2-CH4-1",
        IsothermType::Excess,
        318.2,
        vec![co2(), ch4()],
        Array1::linspace(0.1, 2.0, 5),
        Array2::from_shape_fn((2, 5), |(i, j)| (i + 1) as f64 + j as f64),
        Array2::from_elem((2, 5), 0.5),
        None,
    )
    .unwrap()];
    experiment.authors = Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    experiment.year = Some("2013".to_string());
    experiment.paper_url = Some("https://doi.org/10.1000/example".to_string());
    experiment.paper_doi = Some(vec!["10.1000/example".to_string()]);
    experiment.comments = Some("volumetric rig".to_string());
    experiment
}

fn register_all(db: &AdsorptionDatabase<'_>, experiment: &Experiment) {
    db.register_adsorbate(&co2()).unwrap();
    db.register_adsorbate(&ch4()).unwrap();
    db.register_adsorbent(&calgon()).unwrap();
    db.register_experiment(experiment).unwrap();
}

#[test]
fn experiment_round_trips_with_metadata_and_isotherms() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let experiment = sudi_experiment();
    register_all(&db, &experiment);

    let loaded = db.get_experiment("Sudi").unwrap();
    assert_eq!(loaded.name, "Sudi");
    assert_eq!(loaded.experiment_type, ExperimentType::Volumetric);
    assert_eq!(loaded.temperature, 318.2);
    assert_eq!(loaded.adsorbent.as_ref().unwrap(), &calgon());
    assert_eq!(loaded.authors, experiment.authors);
    assert_eq!(loaded.year, experiment.year);
    assert_eq!(loaded.paper_url, experiment.paper_url);
    assert_eq!(loaded.paper_doi, experiment.paper_doi);
    assert_eq!(loaded.comments, experiment.comments);
    assert_eq!(loaded.monocomponent_isotherms.len(), 2);
    assert_eq!(loaded.mixture_isotherms.len(), 1);
    assert_eq!(loaded.mixture_isotherms[0], experiment.mixture_isotherms[0]);
    assert_eq!(db.list_experiments().unwrap(), vec!["Sudi".to_string()]);
}

#[test]
fn shared_adsorbate_is_stored_once_and_resolved_from_every_isotherm() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let mut experiment = sudi_experiment();
    experiment.monocomponent_isotherms = vec![mono("CO2-01", co2()), mono("CO2-02", co2())];
    experiment.mixture_isotherms = vec![];
    register_all(&db, &experiment);

    assert_eq!(
        db.list_adsorbates().unwrap(),
        vec!["Carbon Dioxide".to_string(), "Methane".to_string()]
    );

    let loaded = db.get_experiment("Sudi").unwrap();
    for isotherm in &loaded.monocomponent_isotherms {
        assert_eq!(isotherm.adsorbate.as_ref().unwrap(), &co2());
    }
}

#[test]
fn dangling_adsorbate_reference_loads_as_none_without_raising() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let mut experiment = sudi_experiment();
    experiment.monocomponent_isotherms = vec![mono("CO2-01", co2()), mono("CO2-02", co2())];
    experiment.mixture_isotherms = vec![];
    register_all(&db, &experiment);

    assert!(db.remove_adsorbate("Carbon Dioxide").unwrap());

    let loaded = db.get_experiment("Sudi").unwrap();
    assert_eq!(loaded.monocomponent_isotherms.len(), 2);
    for isotherm in &loaded.monocomponent_isotherms {
        assert_eq!(isotherm.adsorbate, None);
        // The measured data is untouched by the dangling reference.
        assert_eq!(isotherm.pressures.len(), 10);
    }
}

#[test]
fn dangling_entries_in_a_reference_list_are_skipped_in_order() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let experiment = sudi_experiment();
    register_all(&db, &experiment);

    assert!(db.remove_adsorbate("Carbon Dioxide").unwrap());

    let loaded = db.get_experiment("Sudi").unwrap();
    let mix = &loaded.mixture_isotherms[0];
    let names: Vec<&str> = mix
        .adsorbates
        .iter()
        .map(|adsorbate| adsorbate.name.as_str())
        .collect();
    assert_eq!(names, vec!["Methane"]);
    // Arrays keep their full component axis; the caller sees the shrink.
    assert_eq!(mix.loadings.nrows(), 2);
}

#[test]
fn dangling_adsorbent_reference_loads_as_none() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let experiment = sudi_experiment();
    register_all(&db, &experiment);

    assert!(db.remove_adsorbent("Calgon-F400").unwrap());

    let loaded = db.get_experiment("Sudi").unwrap();
    assert_eq!(loaded.adsorbent, None);
}

#[test]
fn re_registration_replaces_experiment_scalars() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let mut experiment = sudi_experiment();
    register_all(&db, &experiment);

    experiment.temperature = 303.15;
    experiment.comments = None;
    db.register_experiment(&experiment).unwrap();

    let loaded = db.get_experiment("Sudi").unwrap();
    assert_eq!(loaded.temperature, 303.15);
    assert_eq!(loaded.comments, None);
    assert_eq!(db.list_experiments().unwrap(), vec!["Sudi".to_string()]);
}

#[test]
fn re_registration_drops_isotherms_removed_from_the_experiment() {
    let store = Store::open_in_memory().unwrap();
    let db = AdsorptionDatabase::new(&store);

    let mut experiment = sudi_experiment();
    experiment.monocomponent_isotherms = vec![mono("CO2-01", co2()), mono("CH4-01", ch4())];
    register_all(&db, &experiment);

    experiment.monocomponent_isotherms = vec![mono("CO2-01", co2())];
    experiment.mixture_isotherms = vec![];
    db.register_experiment(&experiment).unwrap();

    let loaded = db.get_experiment("Sudi").unwrap();
    let names: Vec<&str> = loaded
        .monocomponent_isotherms
        .iter()
        .map(|isotherm| isotherm.name.as_str())
        .collect();
    assert_eq!(names, vec!["CO2-01"]);
    assert!(loaded.mixture_isotherms.is_empty());
}

#[test]
fn experiments_survive_an_open_close_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adsorption.db");

    let experiment = sudi_experiment();
    {
        let store = Store::open(&path, adsorbase_core::AccessMode::ReadWrite).unwrap();
        let db = AdsorptionDatabase::new(&store);
        register_all(&db, &experiment);
    }

    let store = Store::open(&path, adsorbase_core::AccessMode::ReadOnly).unwrap();
    let db = AdsorptionDatabase::new(&store);
    let loaded = db.get_experiment("Sudi").unwrap();
    assert_eq!(loaded.monocomponent_isotherms.len(), 2);
    assert_eq!(loaded.mixture_isotherms[0], experiment.mixture_isotherms[0]);
}
