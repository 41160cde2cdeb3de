/// 건구온도(°C)에서의 포화 수증기압을 Torr 단위로 구한다.
///
/// Fanger PMV와 Pierce SET이 같은 포화곡선을 쓰도록 두 모델 모두 이 식을 사용한다.
pub fn saturated_vapor_pressure_torr(db_temp_c: f64) -> f64 {
    (18.6686 - 4030.183 / (db_temp_c + 235.0)).exp()
}

/// 같은 포화곡선을 kPa 단위로 구한다. Fanger 모델의 수증기 분압 항에 사용한다.
pub fn saturated_vapor_pressure_kpa(db_temp_c: f64) -> f64 {
    (16.6536 - 4030.183 / (db_temp_c + 235.0)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn torr_and_kpa_describe_the_same_curve() {
        // 1 kPa = 7.50062 Torr
        for t in [0.0, 15.0, 25.0, 40.0] {
            let ratio = saturated_vapor_pressure_torr(t) / saturated_vapor_pressure_kpa(t);
            assert_relative_eq!(ratio, 7.50062, max_relative = 1e-3);
        }
    }

    #[test]
    fn reference_values() {
        assert_relative_eq!(saturated_vapor_pressure_torr(20.0), 17.5308, max_relative = 1e-4);
        assert_relative_eq!(saturated_vapor_pressure_torr(30.0), 31.8285, max_relative = 1e-4);
    }
}
