//! Sample catalog content
//!
//! Loads the starter set of categories, governorates, and places. Loading is
//! idempotent: records whose slug already exists are left untouched.

use eyre::Result;
use log::info;

use placestore::{Category, Duration, Governorate, Place, PlaceStore, StoreError};

/// What a seed run created (existing records are not counted)
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub governorates: usize,
    pub places: usize,
}

/// Load the sample catalog into `store`
pub fn load(store: &PlaceStore) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for category in categories() {
        if created_category(store, &category)? {
            info!("Created category: {}", category.effective_slug());
            report.categories += 1;
        }
    }

    for governorate in governorates() {
        if created_governorate(store, &governorate)? {
            info!("Created governorate: {}", governorate.effective_slug());
            report.governorates += 1;
        }
    }

    let pharaonic = store.category_by_slug("pharaonic-tourism")?.id;
    let islamic = store.category_by_slug("islamic-tourism")?.id;
    let coptic = store.category_by_slug("coptic-tourism")?.id;
    let cairo = store.governorate_by_slug("cairo")?.id;
    let giza = store.governorate_by_slug("giza")?.id;
    let luxor = store.governorate_by_slug("luxor")?.id;

    for place in places(pharaonic, islamic, coptic, cairo, giza, luxor) {
        if created_place(store, &place)? {
            info!("Created place: {}", place.effective_slug());
            report.places += 1;
        }
    }

    Ok(report)
}

fn created_category(store: &PlaceStore, category: &Category) -> Result<bool> {
    match store.category_by_slug(&category.effective_slug()) {
        Ok(_) => Ok(false),
        Err(StoreError::NotFound(_)) => {
            store.insert_category(category)?;
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

fn created_governorate(store: &PlaceStore, governorate: &Governorate) -> Result<bool> {
    match store.governorate_by_slug(&governorate.effective_slug()) {
        Ok(_) => Ok(false),
        Err(StoreError::NotFound(_)) => {
            store.insert_governorate(governorate)?;
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

fn created_place(store: &PlaceStore, place: &Place) -> Result<bool> {
    match store.place_by_slug(&place.effective_slug()) {
        Ok(_) => Ok(false),
        Err(StoreError::NotFound(_)) => {
            store.insert_place(place)?;
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

fn categories() -> Vec<Category> {
    vec![
        Category::new("السياحة الفرعونية", "Pharaonic Tourism")
            .with_slug("pharaonic-tourism")
            .with_description(
                "استكشف عظمة الحضارة المصرية القديمة من خلال الأهرامات والمعابد والمتاحف",
                "Explore the grandeur of ancient Egypt through pyramids, temples, and museums",
            )
            .with_icon("fa-landmark")
            .with_order(1),
        Category::new("السياحة الإسلامية", "Islamic Tourism")
            .with_slug("islamic-tourism")
            .with_description(
                "تعرّف على روائع العمارة الإسلامية والمساجد التاريخية",
                "Discover masterpieces of Islamic architecture and historic mosques",
            )
            .with_icon("fa-mosque")
            .with_order(2),
        Category::new("السياحة القبطية", "Coptic Tourism")
            .with_slug("coptic-tourism")
            .with_description(
                "اكتشف المعالم المسيحية التاريخية والكنائس الأثرية",
                "Discover historic Christian landmarks and ancient churches",
            )
            .with_icon("fa-cross")
            .with_order(3),
    ]
}

fn governorates() -> Vec<Governorate> {
    vec![
        Governorate::new("القاهرة", "Cairo").with_slug("cairo"),
        Governorate::new("الجيزة", "Giza").with_slug("giza"),
        Governorate::new("الأقصر", "Luxor").with_slug("luxor"),
        Governorate::new("أسوان", "Aswan").with_slug("aswan"),
        Governorate::new("الإسكندرية", "Alexandria").with_slug("alexandria"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn places(
    pharaonic: i64,
    islamic: i64,
    coptic: i64,
    cairo: i64,
    giza: i64,
    luxor: i64,
) -> Vec<Place> {
    vec![
        Place::new("أهرامات الجيزة", "Giza Pyramids", pharaonic, giza)
            .with_slug("giza-pyramids")
            .with_city("الهرم", "Al Haram")
            .with_short_description(
                "واحدة من عجائب الدنيا السبع القديمة، الأهرامات الثلاثة الشهيرة وأبو الهول",
                "One of the seven wonders of the ancient world: the three great pyramids and the Sphinx",
            )
            .with_description(
                "تُعد أهرامات الجيزة من أشهر المعالم السياحية في العالم وأحد عجائب الدنيا السبع القديمة. بُنيت هذه الأهرامات منذ أكثر من 4500 عام كمقابر للملوك الفراعنة. يضم الموقع ثلاثة أهرامات رئيسية: هرم خوفو (الهرم الأكبر)، هرم خفرع، وهرم منقرع، بالإضافة إلى تمثال أبو الهول الشهير.",
                "The Giza pyramids are among the most famous sights in the world and the last surviving wonder of the ancient world, built over 4,500 years ago as royal tombs. The site holds the pyramids of Khufu, Khafre, and Menkaure, along with the Great Sphinx.",
            )
            .with_location(29.9792, 31.1342)
            .with_duration(Duration::FourHours)
            .with_best_time("الشتاء والربيع، من نوفمبر إلى مارس", "Winter and spring, November to March")
            .with_entry_fee("200 جنيه للأجانب، 60 جنيه للمصريين", "EGP 200 for foreigners, EGP 60 for Egyptians")
            .with_visitor_tips(
                "احرص على زيارة الموقع في الصباح الباكر لتجنب الحرارة والزحام. ارتدِ ملابس مريحة وأحذية مناسبة للمشي. أحضر كمية كافية من الماء.",
                "Visit early in the morning to avoid heat and crowds. Wear comfortable clothes and walking shoes. Bring plenty of water.",
            )
            .with_priority(1)
            .featured(),
        Place::new("المتحف المصري", "Egyptian Museum", pharaonic, cairo)
            .with_slug("egyptian-museum")
            .with_city("التحرير", "Tahrir")
            .with_short_description(
                "أكبر متحف للآثار المصرية القديمة في العالم، يضم كنوز توت عنخ آمون",
                "The world's largest collection of ancient Egyptian antiquities, home to Tutankhamun's treasures",
            )
            .with_description(
                "يُعد المتحف المصري بالتحرير من أهم وأشهر المتاحف في العالم. يحتوي على أكثر من 120 ألف قطعة أثرية من مختلف العصور الفرعونية. من أبرز معروضات المتحف: كنوز الملك توت عنخ آمون الذهبية، المومياوات الملكية، والتماثيل الضخمة.",
                "The Egyptian Museum in Tahrir holds more than 120,000 artifacts spanning the pharaonic eras, including the golden treasures of Tutankhamun, royal mummies, and colossal statues.",
            )
            .with_location(30.0478, 31.2336)
            .with_duration(Duration::ThreeHours)
            .with_best_time("أي وقت من السنة", "Any time of year")
            .with_entry_fee("200 جنيه للأجانب، 30 جنيه للمصريين", "EGP 200 for foreigners, EGP 30 for Egyptians")
            .with_visitor_tips(
                "خصص وقتاً كافياً للزيارة. يُنصح بالاستعانة بمرشد سياحي. التصوير ممنوع داخل المتحف.",
                "Allow at least three to four hours. A guide is recommended. Photography is not allowed inside.",
            )
            .with_priority(2)
            .featured(),
        Place::new("مسجد محمد علي", "Mohamed Ali Mosque", islamic, cairo)
            .with_slug("mohamed-ali-mosque")
            .with_city("القلعة", "The Citadel")
            .with_short_description(
                "مسجد تاريخي يقع داخل قلعة صلاح الدين، يُعرف بمسجد المرمر",
                "A historic Ottoman-style mosque inside the Citadel of Saladin, known as the Alabaster Mosque",
            )
            .with_description(
                "يُعد مسجد محمد علي من أجمل المساجد في مصر. بُني في القرن التاسع عشر على الطراز العثماني داخل قلعة صلاح الدين الأيوبي. يتميز المسجد بقبته الضخمة ومآذنه الرشيقة.",
                "Built in the nineteenth century in the Ottoman style inside the Citadel of Saladin, the mosque is famous for its great dome, slender minarets, and the alabaster cladding that gives it its name.",
            )
            .with_location(30.0291, 31.2597)
            .with_duration(Duration::TwoHours)
            .with_best_time("الصباح أو قبل المغرب", "Morning, or shortly before sunset")
            .with_entry_fee("80 جنيه للأجانب، 20 جنيه للمصريين", "EGP 80 for foreigners, EGP 20 for Egyptians")
            .with_visitor_tips(
                "ارتدِ ملابس محتشمة. يُنصح بزيارة القلعة بأكملها. يوفر المسجد إطلالة رائعة على القاهرة.",
                "Dress modestly. Plan to see the whole Citadel. The terrace has a sweeping view over Cairo.",
            )
            .with_priority(3)
            .featured(),
        Place::new("الكنيسة المعلقة", "Hanging Church", coptic, cairo)
            .with_slug("hanging-church")
            .with_city("مصر القديمة", "Old Cairo")
            .with_short_description(
                "واحدة من أقدم الكنائس في مصر، تُعرف بالكنيسة المعلقة لبنائها على برجين",
                "One of Egypt's oldest churches, named for being suspended over two Roman gate towers",
            )
            .with_description(
                "الكنيسة المعلقة هي إحدى أقدم الكنائس في مصر والشرق الأوسط، تعود للقرن الثالث الميلادي. سُميت بهذا الاسم لأنها بُنيت على برجين من الأبراج القديمة للحصن الروماني. تتميز الكنيسة بأيقوناتها القديمة وتصميمها المعماري الفريد.",
                "Dating to the third century, the Hanging Church is one of the oldest churches in Egypt and the Middle East, built atop two towers of the Roman fortress of Babylon and known for its ancient icons.",
            )
            .with_location(30.0056, 31.2306)
            .with_duration(Duration::OneHour)
            .with_best_time("أي وقت", "Any time")
            .with_entry_fee("مجاناً", "Free")
            .with_visitor_tips(
                "يُنصح بزيارة المتحف القبطي المجاور. ارتدِ ملابس محتشمة. الزيارة قصيرة نسبياً.",
                "Combine with the Coptic Museum next door. Dress modestly. The visit itself is short.",
            )
            .with_priority(5),
        Place::new("معبد الكرنك", "Karnak Temple", pharaonic, luxor)
            .with_slug("karnak-temple")
            .with_city("الأقصر", "Luxor")
            .with_short_description(
                "أكبر معبد فرعوني في العالم، مجمع ديني ضخم يضم عدة معابد",
                "The largest temple complex of the ancient world, built over two millennia",
            )
            .with_description(
                "معبد الكرنك هو أكبر مجمع معابد في العالم. بُني على مدار أكثر من 2000 عام من قبل فراعنة متعاقبين. يضم المعبد قاعة الأعمدة الشهيرة التي تحتوي على 134 عموداً ضخماً.",
                "Karnak is the largest temple complex in the world, built and extended by successive pharaohs over more than 2,000 years. Its hypostyle hall holds 134 colossal columns.",
            )
            .with_location(25.7188, 32.6573)
            .with_duration(Duration::ThreeHours)
            .with_best_time("الشتاء، من نوفمبر إلى فبراير", "Winter, November to February")
            .with_entry_fee("200 جنيه للأجانب، 40 جنيه للمصريين", "EGP 200 for foreigners, EGP 40 for Egyptians")
            .with_visitor_tips(
                "احجز جولة ليلية لعرض الصوت والضوء. أحضر قبعة وواقي شمس. المشي داخل المعبد يتطلب لياقة بدنية.",
                "Book the sound and light show at night. Bring a hat and sunscreen. Expect a lot of walking.",
            )
            .with_priority(1)
            .featured(),
    ]
}
