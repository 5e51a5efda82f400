//! Hand-authored itinerary served in mock mode.

use crate::domain::{Activity, DayPlan, Itineraries, Itinerary, ItineraryData};

/// (time, title, description, tip, emoji, lat, lng)
type Stop = (&'static str, &'static str, &'static str, &'static str, &'static str, f64, f64);

/// (theme, stops)
type Day = (&'static str, &'static [Stop]);

const ONE_DAY: &[Day] = &[(
    "Essential Highlights",
    &[
        ("09:00", "Bullring & Grand Central", "Start at the landmark shopping centre that pairs modern architecture with hundreds of shops.", "Arrive early to beat the crowds; most shops open at 10:00.", "🛍️", 52.4774, -1.8939),
        ("11:00", "Birmingham Museum & Art Gallery", "One of the UK's leading museums, known for its Pre-Raphaelite collection.", "Free entry. A 10-minute walk from the Bullring.", "🎨", 52.4803, -1.9037),
        ("13:00", "Library of Birmingham", "Visit one of Europe's largest public libraries and its rooftop garden.", "Free entry. The top-floor terrace has the best skyline views.", "📚", 52.4796, -1.9085),
        ("15:00", "Cadbury World", "Explore the history of chocolate at the Bournville factory.", "Paid entry; book ahead. Trains run from New Street to Bournville.", "🍫", 52.4289, -1.9335),
        ("18:00", "Gas Street Basin", "End the day with a stroll along the canals lined with bars and restaurants.", "Great for a relaxed dinner. Narrowboat trips leave from the basin.", "🚤", 52.4760, -1.9068),
    ],
)];

const THREE_DAYS: &[Day] = &[
    (
        "Cultural and Historic Centre",
        &[
            ("09:00", "Birmingham Museum & Art Gallery", "Browse the art and social history collections.", "Free entry. Guided tours run most mornings.", "🖼️", 52.4803, -1.9037),
            ("11:30", "St Philip's Cathedral", "An 18th-century Anglican cathedral with Burne-Jones stained glass.", "Five minutes on foot from the museum.", "⛪", 52.4812, -1.8986),
            ("13:00", "Library of Birmingham", "Admire the filigree facade and terrace gardens.", "Don't miss the panoramic view from the top terrace.", "🌿", 52.4796, -1.9085),
            ("15:00", "Ikon Gallery", "Contemporary art in a converted Victorian school.", "Free entry, donations welcome. Café on site.", "🖌️", 52.4754, -1.9131),
        ],
    ),
    (
        "Industrial Birmingham",
        &[
            ("09:30", "Black Country Living Museum", "Step into industrial history among rebuilt streets and costumed guides.", "Ticketed. Reachable by bus or car from the city centre.", "🏭", 52.5200, -2.0760),
            ("13:00", "Gas Street Basin", "Walk the canals that powered the Industrial Revolution.", "Plenty of lunch spots along the towpath.", "🚶", 52.4760, -1.9068),
            ("15:30", "Thinktank Science Museum", "Interactive exhibits and a planetarium.", "Paid entry, ideal for families. Ten minutes from Moor Street.", "🔭", 52.4823, -1.8857),
        ],
    ),
    (
        "Food and Entertainment",
        &[
            ("10:00", "Cadbury World", "Learn how chocolate is made and try the samples.", "Buy tickets in advance. Easy to reach by train.", "🍬", 52.4289, -1.9335),
            ("13:00", "Barber Institute of Fine Arts", "European masterpieces in an Art Deco gallery.", "Free entry. Located on the University of Birmingham campus.", "🏛️", 52.4497, -1.9311),
            ("15:30", "The Mailbox", "Upmarket shopping and canal-side dining.", "A good stop for afternoon coffee.", "🛒", 52.4763, -1.9034),
            ("18:00", "Chinese Quarter", "A lively district full of authentic restaurants and shops.", "Try the dim sum for dinner.", "🥡", 52.4745, -1.8960),
        ],
    ),
];

const FIVE_DAYS: &[Day] = &[
    (
        "Introduction to the City",
        &[
            ("09:30", "Birmingham Museum & Art Gallery", "A first look at Birmingham's art and social history.", "Free audio guide available.", "🎨", 52.4803, -1.9037),
            ("12:00", "St Paul's Square", "Lunch in the city's last Georgian square.", "Book a table at the busier spots.", "🍽️", 52.4850, -1.9045),
            ("14:30", "Pen Museum", "The story of Birmingham's pen-making trade.", "Small and fascinating; check the opening days.", "✒️", 52.4880, -1.9070),
        ],
    ),
    (
        "Jewellery Quarter",
        &[
            ("10:00", "Museum of the Jewellery Quarter", "A workshop preserved exactly as it was left in 1981.", "Guided tours only; reserve a slot.", "💍", 52.4890, -1.9119),
            ("13:00", "Warstone Lane Cemetery", "Victorian catacombs in the heart of the quarter.", "Free to wander; quiet in the early afternoon.", "🪦", 52.4878, -1.9135),
            ("15:30", "Coffin Works", "A time-capsule factory that made coffin furniture.", "Open Thursday to Sunday.", "⚰️", 52.4822, -1.9079),
        ],
    ),
    (
        "Canals and Waterside",
        &[
            ("10:00", "Gas Street Basin", "Start at the hub of the canal network.", "Narrowboat cruises leave hourly in summer.", "🚤", 52.4760, -1.9068),
            ("12:30", "Brindleyplace", "Waterside squares, cafés and public art.", "Good lunch options around Oozells Square.", "☕", 52.4772, -1.9140),
            ("15:00", "National SEA LIFE Centre", "Tropical sharks and a walk-through ocean tunnel.", "Online tickets are cheaper.", "🐠", 52.4787, -1.9153),
        ],
    ),
    (
        "Parks and Gardens",
        &[
            ("10:00", "Birmingham Botanical Gardens", "Glasshouses spanning four climate zones.", "Allow at least two hours.", "🌺", 52.4660, -1.9293),
            ("13:30", "Cannon Hill Park", "Lakes and lawns next to the MAC arts centre.", "Pedalo hire runs on fine days.", "🌳", 52.4530, -1.9060),
            ("16:00", "Winterbourne House and Garden", "An Arts and Crafts house with restored gardens.", "Combine with a walk across the university campus.", "🏡", 52.4523, -1.9258),
        ],
    ),
    (
        "Farewell Birmingham",
        &[
            ("10:00", "Aston Hall", "A Jacobean mansion with grand period rooms.", "Open seasonally; check dates before visiting.", "🏰", 52.5062, -1.8713),
            ("13:00", "Digbeth", "Street art, independent breweries and food markets.", "Digbeth Dining Club runs on Friday and Saturday nights.", "🎭", 52.4745, -1.8839),
            ("19:00", "Symphony Hall", "Close with a concert in one of Europe's finest acoustics.", "Book seats in advance for weekend performances.", "🎻", 52.4793, -1.9085),
        ],
    ),
];

fn build_days(days: &[Day]) -> Vec<DayPlan> {
    days.iter()
        .zip(1u32..)
        .map(|((theme, stops), day)| DayPlan {
            day,
            theme: theme.to_string(),
            activities: stops
                .iter()
                .map(|&(time, title, description, tip, emoji, lat, lng)| Activity {
                    time: time.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    tip: Some(tip.to_string()),
                    emoji: Some(emoji.to_string()),
                    lat: Some(lat),
                    lng: Some(lng),
                })
                .collect(),
        })
        .collect()
}

/// The canned itinerary with `city`/`country` set to the request's values.
///
/// Activity content always describes Birmingham regardless of the city.
pub fn mock_itinerary(city: &str, country: &str) -> Itinerary {
    Itinerary {
        city: city.to_string(),
        country: country.to_string(),
        highlights: vec![
            "Bullring & Grand Central".to_string(),
            "Library of Birmingham".to_string(),
            "Birmingham Museum & Art Gallery".to_string(),
            "Cadbury World".to_string(),
            "Gas Street Basin".to_string(),
        ],
        itineraries: Itineraries {
            one_day: Some(ItineraryData {
                title: "The Best of Birmingham in 1 Day".to_string(),
                days: build_days(ONE_DAY),
            }),
            three_days: Some(ItineraryData {
                title: "Exploring Birmingham in 3 Days".to_string(),
                days: build_days(THREE_DAYS),
            }),
            five_days: Some(ItineraryData {
                title: "Birmingham in Depth: 5 Days".to_string(),
                days: build_days(FIVE_DAYS),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DurationVariant;

    #[test]
    fn mock_passes_strict_validation() {
        let itinerary = mock_itinerary("Birmingham", "United Kingdom");
        assert_eq!(itinerary.validate(), Ok(()));
    }

    #[test]
    fn mock_day_counts_match_variants() {
        let itinerary = mock_itinerary("Anywhere", "Somewhere");
        for variant in DurationVariant::ALL {
            let data = itinerary.itineraries.get(variant).unwrap();
            assert_eq!(data.days.len() as u32, variant.day_count());
            let days: Vec<u32> = data.days.iter().map(|d| d.day).collect();
            assert_eq!(days, (1..=variant.day_count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn mock_activities_carry_coordinates_near_birmingham() {
        let itinerary = mock_itinerary("Birmingham", "United Kingdom");
        for variant in DurationVariant::ALL {
            for day in &itinerary.itineraries.get(variant).unwrap().days {
                for activity in &day.activities {
                    let (lat, lng) = (activity.lat.unwrap(), activity.lng.unwrap());
                    assert!((lat - 52.48).abs() < 1.5, "{}", activity.title);
                    assert!((lng + 1.90).abs() < 1.5, "{}", activity.title);
                }
            }
        }
    }
}
