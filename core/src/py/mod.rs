// Python-bindinger (feature "python") over json_api, slik at Streamlit-siden
// kan kalle kjernen uten egne pyo3-typer.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::json_api::{aggregate_from_json, compare_from_json, estimate_from_json};

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
fn speed_kmh(interval_minutes: f64) -> PyResult<f64> {
    crate::pace::speed_kmh(interval_minutes).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn estimate_session_json(json_in: &str) -> PyResult<String> {
    estimate_from_json(json_in).map_err(PyValueError::new_err)
}

#[pyfunction]
fn compare_json(plan_json: &str, actuals_json: &str) -> PyResult<String> {
    compare_from_json(plan_json, actuals_json).map_err(PyValueError::new_err)
}

#[pyfunction]
fn aggregate_plan_json(py: Python<'_>, payload: &PyAny) -> PyResult<PyObject> {
    // 1) Få inn JSON-string fra payload (tillater både str og dict)
    let json_in: String = if let Ok(s) = payload.extract::<&str>() {
        s.to_owned()
    } else {
        let json_mod = py
            .import("json")
            .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
        json_mod
            .call_method1("dumps", (payload,))
            .and_then(|o| o.extract::<String>())
            .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))?
    };

    let out = aggregate_from_json(&json_in).map_err(PyValueError::new_err)?;

    // 2) Returnér som dict via json.loads (unngår pyo3 serde-feature)
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    let obj = json_mod
        .call_method1("loads", (out.as_str(),))
        .map_err(|e| PyValueError::new_err(format!("internal JSON parse error via json.loads: {e}")))?;
    Ok(obj.into_py(py))
}

#[pymodule]
fn runplan_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(speed_kmh, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_session_json, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate_plan_json, m)?)?;
    m.add_function(wrap_pyfunction!(compare_json, m)?)?;
    Ok(())
}
