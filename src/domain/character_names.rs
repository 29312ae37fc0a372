//! Character code to display name lookup.
//!
//! The stats provider identifies characters by canonical uppercase codes
//! such as `"DARTHTRAYA"`. [`CharacterNames`] turns them into the names
//! players recognise. Codes missing from the table render verbatim.

use std::collections::HashMap;
use std::path::Path;

use crate::error::WatchError;

/// Built-in name table. Pure reference data.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    ("AAYLASECURA", "Aayla Secura"),
    ("ADMINISTRATORLANDO", "Lando Calrissian"),
    ("ADMIRALACKBAR", "Admiral Ackbar"),
    ("ADMIRALPIETT", "Admiral Piett"),
    ("AHSOKATANO", "Ahsoka Tano"),
    ("AMILYNHOLDO", "Amilyn Holdo"),
    ("ASAJVENTRESS", "Asajj Ventress"),
    ("AURRA_SING", "Aurra Sing"),
    ("B1BATTLEDROIDV2", "B1 Battle Droid"),
    ("B2SUPERBATTLEDROID", "B2 Super Battle Droid"),
    ("BARRISSOFFEE", "Barriss Offee"),
    ("BASTILASHAN", "Bastila Shan"),
    ("BASTILASHANDARK", "Bastila Shan (Fallen)"),
    ("BB8", "BB-8"),
    ("BIGGSDARKLIGHTER", "Biggs Darklighter"),
    ("BISTAN", "Bistan"),
    ("BOBAFETT", "Boba Fett"),
    ("BODHIROOK", "Bodhi Rook"),
    ("BOSSK", "Bossk"),
    ("C3POLEGENDARY", "C-3PO"),
    ("CADBANE", "Cad Bane"),
    ("CANDEROUSORDO", "Canderous Ordo"),
    ("CARTHONASI", "Carth Onasi"),
    ("CASSIANANDOR", "Cassian Andor"),
    ("CC2224", "CC-2224 \"Cody\""),
    ("CHEWBACCALEGENDARY", "Chewbacca"),
    ("CHIEFCHIRPA", "Chief Chirpa"),
    ("CHIEFNEBIT", "Chief Nebit"),
    ("CHIRRUTIMWE", "Chirrut Îmwe"),
    ("CHOPPERS3", "Chopper"),
    ("CLONESERGEANTPHASEI", "Clone Sergeant - Phase I"),
    ("CLONEWARSCHEWBACCA", "Clone Wars Chewbacca"),
    ("COMMANDERLUKESKYWALKER", "Commander Luke Skywalker"),
    ("CORUSCANTUNDERWORLDPOLICE", "Coruscant Underworld Police"),
    ("COUNTDOOKU", "Count Dooku"),
    ("CT210408", "CT-21-0408 \"Echo\""),
    ("CT5555", "CT-5555 \"Fives\""),
    ("CT7567", "CT-7567 \"Rex\""),
    ("DARTHMALAK", "Darth Malak"),
    ("DARTHNIHILUS", "Darth Nihilus"),
    ("DARTHREVAN", "Darth Revan"),
    ("DARTHSIDIOUS", "Darth Sidious"),
    ("DARTHSION", "Darth Sion"),
    ("DARTHTRAYA", "Darth Traya"),
    ("DATHCHA", "Dathcha"),
    ("DEATHTROOPER", "Death Trooper"),
    ("DENGAR", "Dengar"),
    ("DIRECTORKRENNIC", "Director Krennic"),
    ("EETHKOTH", "Eeth Koth"),
    ("EMBO", "Embo"),
    ("EMPERORPALPATINE", "Emperor Palpatine"),
    ("ENFYSNEST", "Enfys Nest"),
    ("EWOKELDER", "Ewok Elder"),
    ("EWOKSCOUT", "Ewok Scout"),
    ("EZRABRIDGERS3", "Ezra Bridger"),
    ("FIRSTORDEREXECUTIONER", "First Order Executioner"),
    ("FIRSTORDEROFFICERMALE", "First Order Officer"),
    ("FIRSTORDERSPECIALFORCESPILOT", "First Order SF TIE Pilot"),
    ("FIRSTORDERTIEPILOT", "First Order TIE Pilot"),
    ("FIRSTORDERTROOPER", "First Order Stormtrooper"),
    ("FINN", "Finn"),
    ("GAMORREANGUARD", "Gamorrean Guard"),
    ("GARSAXON", "Gar Saxon"),
    ("GENERALKENOBI", "General Kenobi"),
    ("GENERALSKYWALKER", "General Skywalker"),
    ("GEONOSIANBROODALPHA", "Geonosian Brood Alpha"),
    ("GEONOSIANSOLDIER", "Geonosian Soldier"),
    ("GEONOSIANSPY", "Geonosian Spy"),
    ("GRANDADMIRALTHRAWN", "Grand Admiral Thrawn"),
    ("GRANDMASTERYODA", "Grand Master Yoda"),
    ("GRANDMOFFTARKIN", "Grand Moff Tarkin"),
    ("GREEDO", "Greedo"),
    ("GRIEVOUS", "General Grievous"),
    ("HANSOLO", "Han Solo"),
    ("HERASYNDULLAS3", "Hera Syndulla"),
    ("HERMITYODA", "Hermit Yoda"),
    ("HK47", "HK-47"),
    ("HOTHHAN", "Captain Han Solo"),
    ("HOTHLEIA", "Rebel Officer Leia Organa"),
    ("HOTHREBELSCOUT", "Hoth Rebel Scout"),
    ("HOTHREBELSOLDIER", "Hoth Rebel Soldier"),
    ("IG11", "IG-11"),
    ("IG86SENTINELDROID", "IG-86 Sentinel Droid"),
    ("IG88", "IG-88"),
    ("IMAGUNDI", "Ima-Gun Di"),
    ("IMPERIALPROBEDROID", "Imperial Probe Droid"),
    ("IMPERIALSUPERCOMMANDO", "Imperial Super Commando"),
    ("JANGOFETT", "Jango Fett"),
    ("JAWA", "Jawa"),
    ("JAWAENGINEER", "Jawa Engineer"),
    ("JAWASCAVENGER", "Jawa Scavenger"),
    ("JEDIKNIGHTCONSULAR", "Jedi Consular"),
    ("JEDIKNIGHTGUARDIAN", "Jedi Knight Guardian"),
    ("JEDIKNIGHTREVAN", "Jedi Knight Revan"),
    ("JOLEEBINDO", "Jolee Bindo"),
    ("JUHANI", "Juhani"),
    ("JYNERSO", "Jyn Erso"),
    ("K2SO", "K-2SO"),
    ("KANANJARRUSS3", "Kanan Jarrus"),
    ("KITFISTO", "Kit Fisto"),
    ("KYLOREN", "Kylo Ren"),
    ("KYLORENUNMASKED", "Kylo Ren (Unmasked)"),
    ("L3_37", "L3-37"),
    ("LOBOT", "Lobot"),
    ("LOGRAY", "Logray"),
    ("LUKESKYWALKER", "Luke Skywalker (Farmboy)"),
    ("LUMINARAUNDULI", "Luminara Unduli"),
    ("MACEWINDU", "Mace Windu"),
    ("MAGMATROOPER", "Magmatrooper"),
    ("MAGNAGUARD", "IG-100 MagnaGuard"),
    ("MAUL", "Darth Maul"),
    ("MISSIONVAO", "Mission Vao"),
    ("MOTHERTALZIN", "Mother Talzin"),
    ("NIGHTSISTERACOLYTE", "Nightsister Acolyte"),
    ("NIGHTSISTERINITIATE", "Nightsister Initiate"),
    ("NIGHTSISTERSPIRIT", "Nightsister Spirit"),
    ("NIGHTSISTERZOMBIE", "Nightsister Zombie"),
    ("NUTEGUNRAY", "Nute Gunray"),
    ("OLDBENKENOBI", "Obi-Wan Kenobi (Old Ben)"),
    ("PADMEAMIDALA", "Padmé Amidala"),
    ("PAO", "Pao"),
    ("PHASMA", "Captain Phasma"),
    ("PLOKOON", "Plo Koon"),
    ("POE", "Poe Dameron"),
    ("POGGLETHELESSER", "Poggle the Lesser"),
    ("PRINCESSLEIA", "Princess Leia"),
    ("QIRA", "Qi'ra"),
    ("QUIGONJINN", "Qui-Gon Jinn"),
    ("R2D2_LEGENDARY", "R2-D2"),
    ("RANGETROOPER", "Range Trooper"),
    ("REY", "Rey (Scavenger)"),
    ("REYJEDITRAINING", "Rey (Jedi Training)"),
    ("ROSETICO", "Rose Tico"),
    ("ROYALGUARD", "Royal Guard"),
    ("SABINEWRENS3", "Sabine Wren"),
    ("SAVAGEOPRESS", "Savage Opress"),
    ("SCARIFREBEL", "Scarif Rebel Pathfinder"),
    ("SHORETROOPER", "Shoretrooper"),
    ("SITHASSASSIN", "Sith Assassin"),
    ("SITHMARAUDER", "Sith Marauder"),
    ("SITHTROOPER", "Sith Trooper"),
    ("SMUGGLERCHEWBACCA", "Veteran Smuggler Chewbacca"),
    ("SMUGGLERHAN", "Veteran Smuggler Han Solo"),
    ("SNOWTROOPER", "Snowtrooper"),
    ("STORMTROOPER", "Stormtrooper"),
    ("STORMTROOPERHAN", "Stormtrooper Han"),
    ("SUNFAC", "Sun Fac"),
    ("T3_M4", "T3-M4"),
    ("TALIA", "Talia"),
    ("TEEBO", "Teebo"),
    ("TIEFIGHTERPILOT", "TIE Fighter Pilot"),
    ("TUSKENRAIDER", "Tusken Raider"),
    ("TUSKENSHAMAN", "Tusken Shaman"),
    ("UGNAUGHT", "Ugnaught"),
    ("URORRURRR", "URoRRuR'R'R"),
    ("VADER", "Darth Vader"),
    ("VEERS", "General Veers"),
    ("VISASMARR", "Visas Marr"),
    ("WAMPA", "Wampa"),
    ("WEDGEANTILLES", "Wedge Antilles"),
    ("WICKET", "Wicket"),
    ("YOUNGCHEWBACCA", "Vandor Chewbacca"),
    ("YOUNGHAN", "Young Han Solo"),
    ("YOUNGLANDO", "Young Lando Calrissian"),
    ("ZAALBAR", "Zaalbar"),
    ("ZAMWESELL", "Zam Wesell"),
    ("ZEBS3", "Garazeb \"Zeb\" Orrelios"),
];

/// Immutable character display-name table.
///
/// Loaded once at startup and shared behind an `Arc`. Total mapping: any
/// code not in the table resolves to itself.
#[derive(Debug, Clone, Default)]
pub struct CharacterNames {
    names: HashMap<String, String>,
}

impl CharacterNames {
    /// Creates a table from explicit `(code, name)` pairs.
    #[must_use]
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_NAMES.iter().copied())
    }

    /// Loads a table from a JSON object of `{ "CODE": "Name" }` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if the file cannot be read or is not
    /// a JSON object of strings.
    pub fn from_json_file(path: &Path) -> Result<Self, WatchError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| WatchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
            .map_err(|e| WatchError::Config(format!("{}: {e}", path.display())))
    }

    /// Parses a table from a JSON object of `{ "CODE": "Name" }` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if `raw` is not a JSON object of
    /// strings.
    pub fn from_json_str(raw: &str) -> Result<Self, WatchError> {
        let names: HashMap<String, String> =
            serde_json::from_str(raw).map_err(|e| WatchError::Config(e.to_string()))?;
        Ok(Self { names })
    }

    /// Resolves a character code to its display name.
    #[must_use]
    pub fn resolve<'a>(&'a self, character_id: &'a str) -> &'a str {
        self.names
            .get(character_id)
            .map_or(character_id, String::as_str)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
