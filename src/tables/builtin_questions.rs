//! Built-in question tables
//!
//! Option values are annual tCO₂e contributions before country scaling.

use super::questions::{Question, QuestionOption};
use crate::category::Category::{self, Digital, Food, Housing, Misc, Shopping, Transport};

/// (label, value, emoji)
pub(crate) type OptionDef = (&'static str, f64, &'static str);

/// (id, category, title, options)
pub(crate) type QuestionDef = (&'static str, Category, &'static str, &'static [OptionDef]);

pub(crate) fn build(defs: &[QuestionDef]) -> Vec<Question> {
    defs.iter()
        .map(|(id, category, title, options)| Question {
            id: id.to_string(),
            category: *category,
            title: title.to_string(),
            options: options
                .iter()
                .map(|(label, value, emoji)| QuestionOption {
                    label: label.to_string(),
                    value: *value,
                    emoji: Some(emoji.to_string()),
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// MIDDLE SCHOOL
// ============================================================================

pub(crate) static MIDDLE_SCHOOL: &[QuestionDef] = &[
    ("school_commute", Transport, "How do you usually get to school?", &[
        ("Walk / Cycle", 0.02, "🚶"),
        ("School bus", 0.08, "🚌"),
        ("Car ride", 0.15, "🚗"),
    ]),
    ("home_cooling", Housing, "AC or fan use at home (typical day)", &[
        ("Rare", 0.05, "🧊"),
        ("1–4 hrs/day", 0.12, "🌬️"),
        ("> 4 hrs/day", 0.22, "🔥"),
    ]),
    ("diet", Food, "Your usual diet", &[
        ("Vegetarian/plant-forward", 0.18, "🥗"),
        ("Mixed (some meat)", 0.28, "🍳"),
        ("Meat often (several times/week)", 0.45, "🍗"),
    ]),
    ("screen_time", Digital, "Daily screen time (study + fun)", &[
        ("Under 2 hrs", 0.03, "📱"),
        ("2–5 hrs", 0.07, "💻"),
        ("Over 5 hrs", 0.12, "🖥️"),
    ]),
    ("snacks_drinks", Misc, "Packaged snacks & fizzy drinks", &[
        ("Rare", 0.03, "🥤"),
        ("Sometimes", 0.06, "🍫"),
        ("Often", 0.1, "🍬"),
    ]),
    ("shower_length", Housing, "Average shower length", &[
        ("Under 5 min", 0.02, "🚿"),
        ("5–10 min", 0.05, "🛁"),
        ("Over 10 min", 0.08, "💧"),
    ]),
    ("laundry_temp", Housing, "Laundry water temperature", &[
        ("Cold", 0.01, "🧺"),
        ("Warm", 0.03, "♨️"),
        ("Hot", 0.06, "🔥"),
    ]),
    ("bulbs", Housing, "Light bulbs at home", &[
        ("Mostly LED", 0.01, "💡"),
        ("Mixed", 0.03, "🔆"),
        ("Mostly old bulbs", 0.06, "🔌"),
    ]),
    ("standby_power", Housing, "Do you unplug chargers/devices?", &[
        ("Always", 0.01, "🔋"),
        ("Sometimes", 0.03, "🔌"),
        ("Rarely", 0.05, "⚡"),
    ]),
    ("recycling", Misc, "Recycling at home/school", &[
        ("Most items", 0.01, "♻️"),
        ("Some items", 0.03, "🧴"),
        ("None", 0.06, "🗑️"),
    ]),
    ("single_use", Misc, "Single-use plastic (bottles/bags)", &[
        ("Rare (reusable bottle/bag)", 0.01, "🥤"),
        ("Sometimes", 0.03, "🛍️"),
        ("Often", 0.06, "🧃"),
    ]),
    ("local_food", Food, "Local/seasonal food choices", &[
        ("Often", 0.02, "🥦"),
        ("Sometimes", 0.05, "🍎"),
        ("Rare", 0.08, "🍓"),
    ]),
    ("eating_out", Food, "Eating out / delivery", &[
        ("Under 1×/week", 0.03, "🍽️"),
        ("1–3×/week", 0.06, "🍔"),
        ("Over 3×/week", 0.1, "🍟"),
    ]),
    ("paper_use", Shopping, "Paper use (notebooks/prints)", &[
        ("Low / mostly digital", 0.02, "📱"),
        ("Mixed", 0.04, "📒"),
        ("High", 0.07, "📄"),
    ]),
    ("secondhand_books", Shopping, "Second-hand books / sharing", &[
        ("Often", 0.01, "📚"),
        ("Sometimes", 0.03, "🔖"),
        ("Rare", 0.06, "🧾"),
    ]),
    ("water_heating_ms", Housing, "Water heating at home", &[
        ("Solar / heat pump", 0.02, "☀️"),
        ("Electric", 0.05, "🔌"),
        ("Gas", 0.08, "🔥"),
    ]),
];

// ============================================================================
// HIGH SCHOOL
// ============================================================================

pub(crate) static HIGH_SCHOOL: &[QuestionDef] = &[
    ("school_commute", Transport, "How do you usually get to school? (most days)", &[
        ("Walk or cycle", 0.02, "🚶"),
        ("Public bus/metro", 0.07, "🚈"),
        ("Car or motorbike", 0.18, "🏍️"),
    ]),
    ("distance_school", Transport, "Approx one-way distance to school", &[
        ("Under 2 km (1.2 mi)", 0.02, "📏"),
        ("2–8 km (1–5 mi)", 0.05, "🛤️"),
        ("> 8 km (>5 mi)", 0.1, "🛣️"),
    ]),
    ("electricity_saving", Housing, "When leaving a room: lights/fans off?", &[
        ("Always (habit)", 0.03, "💡"),
        ("Sometimes", 0.07, "🕯️"),
        ("Rarely", 0.12, "⚡"),
    ]),
    ("ac_use", Housing, "AC or heater on a typical day", &[
        ("Rare (only hot/cold waves)", 0.04, "🧊"),
        ("1–4 hrs/day", 0.1, "🌬️"),
        ("> 4 hrs/day", 0.2, "🔥"),
    ]),
    ("diet", Food, "Your usual diet", &[
        ("Vegetarian/plant-forward", 0.18, "🥗"),
        ("Mixed (some meat)", 0.3, "🍳"),
        ("Meat often (several times/week)", 0.5, "🍗"),
    ]),
    ("red_meat", Food, "Red meat (beef/lamb) per week", &[
        ("0–1 meals/week", 0.04, "🥩"),
        ("2–3 meals/week", 0.09, "🍖"),
        ("> 3 meals/week", 0.16, "🍔"),
    ]),
    ("dairy", Food, "Dairy servings per day (milk/cheese)", &[
        ("0–1", 0.03, "🥛"),
        ("2–3", 0.06, "🧀"),
        ("> 3", 0.09, "🍦"),
    ]),
    ("clothes_buy", Shopping, "Buying new clothes (not used/thrift)", &[
        ("Rare / Thrift / Swap", 0.05, "🧥"),
        ("Every 2–3 months", 0.1, "👚"),
        ("Monthly splurge", 0.18, "🛍️"),
    ]),
    ("screen_time", Digital, "Screen time (study + fun) on weekdays", &[
        ("Under 2 hrs/day", 0.03, "📱"),
        ("2–5 hrs/day", 0.08, "💻"),
        ("> 5 hrs/day", 0.14, "🖥️"),
    ]),
    ("gaming_hours", Digital, "Gaming hours per week", &[
        ("Under 3 hrs", 0.02, "🎮"),
        ("3–7 hrs", 0.05, "🕹️"),
        ("> 7 hrs", 0.1, "🧩"),
    ]),
    ("device_upgrades", Shopping, "New phone/tablet upgrade cycle", &[
        ("Over 3 years", 0.02, "📵"),
        ("2–3 years", 0.05, "📲"),
        ("Under 2 years", 0.1, "✨"),
    ]),
    ("delivery_freq", Shopping, "Online delivery frequency (all items)", &[
        ("Less than 1×/month", 0.02, "📦"),
        ("1–3×/month", 0.05, "🚚"),
        ("More than 3×/month", 0.1, "🛒"),
    ]),
    ("ride_share", Transport, "Carpooling / ride-share", &[
        ("Often (weekly)", 0.03, "🚗"),
        ("Sometimes", 0.06, "🚘"),
        ("Never", 0.11, "🚙"),
    ]),
    ("food_waste", Food, "Throwing away uneaten food", &[
        ("Rarely (plan leftovers)", 0.02, "🥫"),
        ("Sometimes", 0.05, "🍞"),
        ("Often", 0.09, "🗑️"),
    ]),
    ("water_heating", Housing, "Water heating at home", &[
        ("Solar / heat pump", 0.02, "☀️"),
        ("Electric", 0.05, "🔌"),
        ("Gas", 0.08, "🔥"),
    ]),
    ("paperless", Shopping, "Notes & homework: paper vs digital", &[
        ("Mostly digital", 0.02, "📱"),
        ("Mix of both", 0.04, "🗒️"),
        ("Mostly paper/prints", 0.07, "🖨️"),
    ]),
    ("recycling_hs", Misc, "Recycling at home/school", &[
        ("Most items (paper/plastic/e-waste)", 0.01, "♻️"),
        ("Some items", 0.03, "🧴"),
        ("None", 0.06, "🗑️"),
    ]),
];

// ============================================================================
// COLLEGE
// ============================================================================

pub(crate) static COLLEGE: &[QuestionDef] = &[
    ("campus_commute", Transport, "Weekly commute to campus (most weeks)", &[
        ("Walk/Cycle/e-scooter", 0.04, "🚲"),
        ("Public transit", 0.1, "🚇"),
        ("Car/Motorbike", 0.28, "🚗"),
    ]),
    ("room_cooling", Housing, "AC/heater in your room (typical day)", &[
        ("Rare", 0.06, "🧊"),
        ("1–4 hrs/day", 0.14, "🌬️"),
        ("> 4 hrs/day", 0.28, "🔥"),
    ]),
    ("diet", Food, "Your usual diet", &[
        ("Mostly plant-based", 0.2, "🥗"),
        ("Mixed (some meat)", 0.35, "🍳"),
        ("Meat often (several times/week)", 0.6, "🍗"),
    ]),
    ("short_flights", Transport, "Short flights in last 12 months (<3h)", &[
        ("0", 0.0, "🛫"),
        ("1–2", 0.4, "✈️"),
        ("> 2", 0.8, "🛬"),
    ]),
    ("long_flights", Transport, "Long flights in last 12 months (>3h)", &[
        ("0", 0.0, "🛫"),
        ("1", 0.9, "✈️"),
        ("> 1", 1.6, "🌏"),
    ]),
    ("online_stream", Digital, "Weekly video streaming (HD/4K)", &[
        ("Under 4 hrs", 0.05, "📺"),
        ("4–10 hrs", 0.12, "🎬"),
        ("Over 10 hrs", 0.22, "🖥️"),
    ]),
    ("gaming_pc", Digital, "Gaming mostly on…", &[
        ("Mobile/Console", 0.04, "📱"),
        ("Laptop", 0.08, "💻"),
        ("Desktop PC", 0.14, "🖥️"),
    ]),
    ("shopping", Shopping, "New gadgets/clothes purchase frequency", &[
        ("Rare / Thrift / Refurb", 0.06, "♻️"),
        ("Quarterly", 0.12, "📦"),
        ("Monthly", 0.22, "🛍️"),
    ]),
    ("delivery_freq", Shopping, "Online delivery frequency (all items)", &[
        ("Less than 1×/month", 0.03, "📦"),
        ("1–3×/month", 0.06, "🚚"),
        ("More than 3×/month", 0.12, "🛒"),
    ]),
    ("dorm_appliances", Housing, "Appliances in room (kettle/fridge/etc)", &[
        ("Minimal", 0.04, "🥤"),
        ("Some", 0.09, "🍳"),
        ("Many", 0.15, "🍽️"),
    ]),
    ("heating_type", Housing, "Heating type in accommodation", &[
        ("Heat pump / district", 0.05, "🏘️"),
        ("Electric", 0.1, "🔌"),
        ("Gas", 0.16, "🔥"),
    ]),
    ("food_waste", Food, "Throwing away uneaten food", &[
        ("Rarely (plan leftovers)", 0.02, "🥫"),
        ("Sometimes", 0.05, "🍞"),
        ("Often", 0.09, "🗑️"),
    ]),
    ("eat_out", Food, "Eating out / delivery", &[
        ("Under 1×/week", 0.04, "🍽️"),
        ("1–3×/week", 0.08, "🍔"),
        ("Over 3×/week", 0.14, "🍟"),
    ]),
    ("car_miles", Transport, "Weekly car/motorbike distance", &[
        ("Under 10 km (6 mi)", 0.04, "🛣️"),
        ("10–40 km (6–25 mi)", 0.12, "🛞"),
        ("Over 40 km (>25 mi)", 0.24, "⛽"),
    ]),
    ("ride_share", Transport, "Carpooling / ride-share", &[
        ("Often (weekly)", 0.03, "🚗"),
        ("Sometimes", 0.06, "🚘"),
        ("Never", 0.11, "🚙"),
    ]),
    ("recycling", Misc, "Recycling in dorm/home", &[
        ("Most items", 0.01, "♻️"),
        ("Some items", 0.03, "🧴"),
        ("None", 0.06, "🗑️"),
    ]),
    ("single_use", Misc, "Single-use plastics (bottles/bags)", &[
        ("Rare (reusable bottle/bag)", 0.01, "🥤"),
        ("Sometimes", 0.03, "🛍️"),
        ("Often", 0.06, "🧃"),
    ]),
    ("distance_campus", Transport, "Approx one-way distance to campus", &[
        ("Under 2 km (1.2 mi)", 0.03, "📏"),
        ("2–8 km (1–5 mi)", 0.07, "🛤️"),
        ("> 8 km (>5 mi)", 0.12, "🛣️"),
    ]),
    ("bike_access", Transport, "Do you have easy access to a cycle/e-scooter?", &[
        ("Yes, I use it", 0.02, "🚴"),
        ("Sometimes", 0.05, "🛴"),
        ("No", 0.09, "🚶"),
    ]),
    ("green_power", Housing, "Does your housing use any green electricity (renewable/green tariff)?", &[
        ("Yes / part of it", 0.04, "🌱"),
        ("Not sure", 0.07, "❓"),
        ("No", 0.1, "⚡"),
    ]),
    ("thermostat", Housing, "Thermostat setting (heating/cooling) most days", &[
        ("Eco (18–20°C / 64–68°F)", 0.04, "🌡️"),
        ("Normal (21–23°C / 70–73°F)", 0.07, "🏠"),
        ("Warm/Cool (24+°C or <18°C)", 0.12, "🔥"),
    ]),
    ("paperless_college", Shopping, "Notes & coursework: paper vs digital", &[
        ("Mostly digital", 0.02, "📱"),
        ("Mix of both", 0.04, "🗒️"),
        ("Mostly paper/prints", 0.07, "🖨️"),
    ]),
];
