use adsorbase_core::{
    Adsorbate, HandlerError, IsothermDataHandler, IsothermType, MixIsothermFileData,
    MonoIsothermFileData,
};
use ndarray::{array, Array1, Array2};

struct UnextendedHandler;

impl IsothermDataHandler for UnextendedHandler {}

struct FixedMonoHandler;

impl IsothermDataHandler for FixedMonoHandler {
    fn mono_data(
        &self,
        _file_data: &MonoIsothermFileData,
    ) -> adsorbase_core::HandlerResult<(Array1<f64>, Array1<f64>)> {
        Ok((
            Array1::linspace(0.0, 9.0, 10),
            Array1::linspace(20.0, 50.0, 10),
        ))
    }
}

struct JaggedMixHandler;

impl IsothermDataHandler for JaggedMixHandler {
    fn mix_data(
        &self,
        _file_data: &MixIsothermFileData,
    ) -> adsorbase_core::HandlerResult<(Array1<f64>, Array2<f64>, Array2<f64>)> {
        // Component axis of the composition disagrees with the loadings.
        Ok((
            array![1.0, 2.0],
            array![[1.0, 2.0], [3.0, 4.0]],
            Array2::from_elem((1, 2), 1.0),
        ))
    }
}

fn co2_file() -> MonoIsothermFileData {
    MonoIsothermFileData {
        file_name: "SUDI_co2.txt".to_string(),
        adsorbate: Adsorbate::new("Carbon Dioxide", Some("CO2".to_string())),
    }
}

fn mix_file() -> MixIsothermFileData {
    MixIsothermFileData {
        file_name: "SUDI_CO2CH4_20.txt".to_string(),
        adsorbates: vec![
            Adsorbate::new("Carbon Dioxide", Some("CO2".to_string())),
            Adsorbate::new("Methane", Some("CH4".to_string())),
        ],
    }
}

#[test]
fn unextended_handler_reports_mono_data_as_not_implemented() {
    let err = UnextendedHandler.mono_data(&co2_file()).unwrap_err();
    assert!(matches!(err, HandlerError::NotImplemented("mono_data")));
}

#[test]
fn unextended_handler_reports_mix_data_as_not_implemented() {
    let err = UnextendedHandler.mix_data(&mix_file()).unwrap_err();
    assert!(matches!(err, HandlerError::NotImplemented("mix_data")));
}

#[test]
fn create_mono_isotherm_surfaces_not_implemented() {
    let err = UnextendedHandler
        .create_mono_isotherm("CO2-01", IsothermType::Excess, 318.2, &co2_file(), None, None)
        .unwrap_err();
    assert!(matches!(err, HandlerError::NotImplemented("mono_data")));
}

#[test]
fn create_mono_isotherm_builds_a_validated_record() {
    let isotherm = FixedMonoHandler
        .create_mono_isotherm("CO2-01", IsothermType::Excess, 318.2, &co2_file(), None, None)
        .unwrap();

    assert_eq!(isotherm.name, "CO2-01");
    assert_eq!(isotherm.adsorbate.as_ref().unwrap().name, "Carbon Dioxide");
    assert_eq!(isotherm.loadings[0], 20.0);
}

#[test]
fn create_mix_isotherm_rejects_mismatched_extracted_arrays() {
    let err = JaggedMixHandler
        .create_mix_isotherm("CO2-CH4-1", IsothermType::Excess, 318.2, &mix_file(), None)
        .unwrap_err();
    assert!(matches!(err, HandlerError::Validation(_)));
}
