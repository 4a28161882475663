//! # Weather Tips
//!
//! Maps an outdoor temperature and the current clock time to an ordered list
//! of energy-saving tips. The list is fixed per temperature band and always
//! ends with exactly one daylight tip.

use time::Time;

use crate::utils::constant::{SUNRISE, SUNSET};

const HOT_WEATHER_TIPS: [&str; 10] = [
    "Consider setting your AC to 24°C for efficiency and reducing energy consumption.",
    "Close blinds and curtains during the hottest part of the day to reduce heat indoors.",
    "Drink plenty of water to stay hydrated and avoid overheating.",
    "Wear light, breathable clothing to stay cool and reduce the need for excessive air conditioning.",
    "Avoid using heat-generating appliances like ovens and stoves during peak heat hours.",
    "If possible, spend time in a cooler, shaded area or outdoors during cooler parts of the day.",
    "Use a fan to circulate air if AC isn't available, and ensure your fan is positioned to create cross-ventilation.",
    "Ensure your AC or cooling system is well-maintained, and consider replacing old filters to increase efficiency.",
    "Check insulation in windows, walls, and doors to prevent cool air from escaping, and upgrade insulation if necessary.",
    "If your home is equipped with smart thermostats, program them to optimize cooling during peak hours.",
];

const COLD_WEATHER_TIPS: [&str; 10] = [
    "Lower your thermostat to save energy, and set it to 18°C when you're not at home or asleep.",
    "Seal any window drafts with weatherstripping or use draft stoppers to keep warmth inside.",
    "Wear layers to stay warm and reduce the need for heating. Wool and fleece are excellent for insulation.",
    "Use thermal curtains or heavy drapes to trap warmth inside and block the cold air from entering.",
    "Keep your home’s heating system well-maintained, and consider getting it serviced before winter to improve efficiency.",
    "Use a space heater in rooms you frequent, but ensure it's energy-efficient and safe to use.",
    "Cook or bake to add warmth to your home while preparing meals—this helps reduce the need for additional heating.",
    "Consider using electric blankets or heated mattress pads for additional warmth in the bedroom.",
    "Upgrade insulation in your home, especially in the attic and basement, where heat loss is most significant.",
    "If your home has a fireplace, ensure it's properly sealed when not in use to prevent heat loss.",
];

const MILD_WEATHER_TIPS: [&str; 7] = [
    "Open windows to cool down naturally, especially during the early morning or late evening.",
    "Use ceiling fans instead of AC to save energy and ensure proper air circulation.",
    "Take advantage of natural sunlight by opening blinds during the day and closing them at night to keep warmth inside.",
    "Switch to energy-efficient LED bulbs that emit less heat and consume less energy.",
    "Consider using natural fabrics like cotton for bedding to stay comfortable and reduce reliance on climate control.",
    "Turn off lights and electronics when not in use to save energy and prevent excess heat in your home.",
    "If your home has smart devices, set them to optimize energy usage, like smart thermostats or lighting systems.",
];

// Outside daylight hours the tip must not rely on natural light.
const BEFORE_SUNRISE_TIP: &str =
    "Daylight is coming soon: keep only the lights you need on until the sun rises.";
const AFTER_SUNSET_TIP: &str =
    "After sunset, light only the rooms you are using and switch off the rest.";
const DAYTIME_TIP: &str =
    "Take advantage of natural light and turn off lamps during the day to reduce energy consumption.";

/// Temperature band used to pick the base tip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    /// Strictly above 30 °C
    Hot,
    /// Strictly below 10 °C
    Cold,
    /// Between 10 °C and 30 °C, inclusive
    Mild,
}

impl TemperatureBand {
    pub fn from_celsius(temperature: f64) -> Self {
        if temperature > 30.0 {
            TemperatureBand::Hot
        } else if temperature < 10.0 {
            TemperatureBand::Cold
        } else {
            TemperatureBand::Mild
        }
    }

    /// Label stored as a weather recommendation's temperature condition.
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureBand::Hot => "hot",
            TemperatureBand::Cold => "cold",
            TemperatureBand::Mild => "mild",
        }
    }

    fn tips(self) -> &'static [&'static str] {
        match self {
            TemperatureBand::Hot => &HOT_WEATHER_TIPS,
            TemperatureBand::Cold => &COLD_WEATHER_TIPS,
            TemperatureBand::Mild => &MILD_WEATHER_TIPS,
        }
    }
}

fn daylight_tip(now: Time) -> &'static str {
    if now < SUNRISE {
        BEFORE_SUNRISE_TIP
    } else if now > SUNSET {
        AFTER_SUNSET_TIP
    } else {
        DAYTIME_TIP
    }
}

/// Returns the tips for `temperature` (°C) at clock time `now`.
pub fn recommendation_tips(temperature: f64, now: Time) -> Vec<&'static str> {
    let band_tips = TemperatureBand::from_celsius(temperature).tips();

    let mut tips = Vec::with_capacity(band_tips.len() + 1);
    tips.extend_from_slice(band_tips);
    tips.push(daylight_tip(now));
    tips
}
