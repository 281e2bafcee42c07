/*! Declared dataset configurations

Configurations are listed in declaration order, grouped by corpus.
Lookup is done by `(corpus, name)`.
!*/
use lazy_static::lazy_static;

use crate::config::{Corpus, DatasetConfig, Extra};
use crate::corpora::{aihub, klue, kor_corpora, korquad, nikl, ParserKind};
use crate::error::Error;
use crate::split::Partition::{Test, Train, Validation};
use crate::split::{Partition, SplitPreset};

lazy_static! {
    pub static ref CONFIGS: Vec<DatasetConfig> = {
        let mut configs = aihub_configs();
        configs.extend(klue_configs());
        configs.extend(korquad_configs());
        configs.extend(nikl_configs());
        configs.extend(kor_corpora_configs());
        configs
    };
}

/// Get a configuration by corpus and name.
pub fn get(corpus: Corpus, name: &str) -> Result<&'static DatasetConfig, Error> {
    CONFIGS
        .iter()
        .find(|c| c.corpus == corpus && c.name == name)
        .ok_or_else(|| Error::UnknownConfig(format!("{}/{}", corpus, name)))
}

/// Configurations of a corpus (or of every corpus), in declaration order.
pub fn list(corpus: Option<Corpus>) -> impl Iterator<Item = &'static DatasetConfig> {
    CONFIGS
        .iter()
        .filter(move |c| corpus.map_or(true, |corpus| c.corpus == corpus))
}

const AIHUB_HOMEPAGE: &str = "https://aihub.or.kr/";

fn aihub_config(
    name: &str,
    root: &str,
    patterns: &[(Partition, &[&str])],
    format: aihub::Format,
) -> DatasetConfig {
    DatasetConfig::manual(Corpus::Aihub, name, root, patterns, ParserKind::Aihub(format))
        .with_homepage(AIHUB_HOMEPAGE)
}

fn aihub_configs() -> Vec<DatasetConfig> {
    let training = [(Train, &["Training/*.json"][..]), (Validation, &["Validation/*.json"][..])];

    let mut configs = Vec::new();
    for kind in ["normal", "noanswer", "clue0529"] {
        let name = format!("mrc.{}.squad.v1.0", kind);
        let file = format!("ko_nia_{}_squad_all.json", kind);
        let patterns = [(Train, &[file.as_str()][..])];
        let root = "AIHub/MRC/기계독해분야";
        let config = aihub_config(&name, root, &patterns, aihub::Format::Mrc);
        let split = config
            .clone()
            .with_split(SplitPreset::RawCorpus)
            .renamed(&format!("{}.split", name));
        configs.push(config);
        configs.push(split);
    }

    configs.push(aihub_config(
        "book_mrc.v1.0",
        "AIHub/BookMRC",
        &training,
        aihub::Format::BookMrc,
    ));

    let specialty = [
        ("paper", "논문*.json", aihub::Format::SpecialtyPaper),
        ("statute", "법령*.json", aihub::Format::SpecialtyStatute),
        ("patent_n", "특허_[0-9][0-9].json", aihub::Format::SpecialtyPatentN),
        ("patent_a", "특허_z*.json", aihub::Format::SpecialtyPatentA),
        ("leading_case", "판례*.json", aihub::Format::SpecialtyLeadingCase),
    ];
    for (kind, pattern, format) in specialty {
        let train = format!("Training/{}", pattern);
        let validation = format!("Validation/{}", pattern);
        let config = aihub_config(
            &format!("specialty_corpus.{}.v1.0", kind),
            "AIHub/전문분야 말뭉치",
            &[(Train, &[train.as_str()]), (Validation, &[validation.as_str()])],
            format,
        );
        configs.push(match format {
            aihub::Format::SpecialtyPatentA => config.with_split(SplitPreset::RawCorpus),
            _ => config,
        });
    }

    configs.extend(vec![
        aihub_config(
            "specialty_ko_en.v1.0",
            "AIHub/전문분야한영",
            &training,
            aihub::Format::SpecialtyKoEn,
        ),
        aihub_config(
            "korean_sns.v1.0",
            "AIHub/한국어 SNS",
            &[(Train, &["Training/*.json"])],
            aihub::Format::KoreanSns,
        )
        .with_split(SplitPreset::RawCorpus),
        aihub_config(
            "korean_dialog.v1.0",
            "AIHub/한국어 대화",
            &[(Train, &["*.xlsx"])],
            aihub::Format::KoreanDialog,
        )
        .with_split(SplitPreset::RawCorpus),
        aihub_config(
            "korean_dialog_summary.v1.0",
            "AIHub/한국어 대화 요약",
            &training,
            aihub::Format::KoreanDialogSummary,
        ),
        aihub_config(
            "translation_ko_en_tech.v1.0",
            "AIHub/한국어-영어 번역 말뭉치(기술과학)",
            &training,
            aihub::Format::TranslationKoEn,
        ),
        aihub_config(
            "translation_ko_en_social.v1.0",
            "AIHub/한국어-영어 번역 말뭉치(사회과학)",
            &training,
            aihub::Format::TranslationKoEn,
        ),
    ]);

    let parallel = [
        ("informal", "1_구어체*.xlsx", aihub::Format::ParallelInformal),
        ("conversational", "2_대화체.xlsx", aihub::Format::ParallelConversational),
        ("news", "3_문어체_뉴스*.xlsx", aihub::Format::ParallelNews),
        ("culture", "4_문어체_한국문화.xlsx", aihub::Format::ParallelCulture),
        ("ordinance", "5_문어체_조례.xlsx", aihub::Format::ParallelOrdinance),
        ("web", "6_문어체_지자체웹사이트.xlsx", aihub::Format::ParallelOrdinance),
    ];
    for (kind, pattern, format) in parallel {
        configs.push(
            aihub_config(
                &format!("ko_en_trans_parallel_{}.v1.0", kind),
                "AIHub/한국어-영어 번역(병렬) 말뭉치",
                &[(Train, &[pattern])],
                format,
            )
            .with_split(SplitPreset::RawCorpus),
        );
    }

    configs.extend(vec![
        aihub_config(
            "translation_ko_ja.v1.0",
            "AIHub/한국어-일본어 번역 말뭉치",
            &training,
            aihub::Format::TranslationKoJa,
        ),
        aihub_config(
            "translation_ko_zh_tech.v1.0",
            "AIHub/한국어-중국어 번역 말뭉치(기술과학)",
            &training,
            aihub::Format::TranslationKoZh,
        ),
        aihub_config(
            "translation_ko_zh_social.v1.0",
            "AIHub/한국어-중국어 번역 말뭉치(사회과학)",
            &training,
            aihub::Format::TranslationKoZh,
        ),
    ]);

    configs
}

const KLUE_ROOT: &str = "https://raw.githubusercontent.com/KLUE-benchmark/KLUE/main/klue_benchmark";

fn klue_configs() -> Vec<DatasetConfig> {
    let tasks = [
        ("tc", "ynat-v1", "json", klue::Format::Tc),
        ("tc.full", "ynat-v1", "json", klue::Format::TcFull),
        ("sts", "klue-sts-v1", "json", klue::Format::Sts),
        ("sts.full", "klue-sts-v1", "json", klue::Format::StsFull),
        ("nli", "klue-nli-v1", "json", klue::Format::Nli),
        ("nli.full", "klue-nli-v1", "json", klue::Format::NliFull),
        ("ner", "klue-ner-v1", "tsv", klue::Format::Ner),
        ("re", "klue-re-v1", "json", klue::Format::Re),
        ("dp", "klue-dp-v1", "tsv", klue::Format::Dp),
        ("mrc", "klue-mrc-v1", "json", klue::Format::Mrc),
        ("dst", "wos-v1", "json", klue::Format::Dst),
        ("dst.gen", "wos-v1", "json", klue::Format::DstGen),
    ];

    tasks
        .iter()
        .map(|(name, task, ext, format)| {
            let train = format!("{}/{}/{}_train.{}", KLUE_ROOT, task, task, ext);
            let dev = format!("{}/{}/{}_dev.{}", KLUE_ROOT, task, task, ext);
            let config = DatasetConfig::remote(
                Corpus::Klue,
                name,
                &[(Train, &[train.as_str()]), (Test, &[dev.as_str()])],
                ParserKind::Klue(*format),
            )
            .with_homepage("https://klue-benchmark.com/");

            match format {
                klue::Format::DstGen => config.with_extra(Extra::Auxiliary {
                    url: format!("{}/{}/ontology.json", KLUE_ROOT, task),
                }),
                _ => config,
            }
        })
        .collect()
}

const KORQUAD_ROOT: &str = "https://github.com/korquad/korquad.github.io/raw/master/dataset";

fn korquad_configs() -> Vec<DatasetConfig> {
    let homepage = "https://korquad.github.io/";
    let train = format!("{}/KorQuAD_v1.0_train.json", KORQUAD_ROOT);
    let dev = format!("{}/KorQuAD_v1.0_dev.json", KORQUAD_ROOT);
    let v1 = |name: &str, dev_partition| {
        DatasetConfig::remote(
            Corpus::Korquad,
            name,
            &[(Train, &[train.as_str()]), (dev_partition, &[dev.as_str()])],
            ParserKind::Korquad(korquad::Format::V1),
        )
        .with_homepage(homepage)
    };
    let v2_archives = |split: &str, count: usize| -> Vec<String> {
        (0..count)
            .map(|idx| {
                format!(
                    "{}/KorQuAD_2.1/{}/KorQuAD_2.1_{}_{:02}.zip",
                    KORQUAD_ROOT, split, split, idx
                )
            })
            .collect()
    };
    let v2_train = v2_archives("train", 13);
    let v2_dev = v2_archives("dev", 2);
    let v2 = |name: &str, dev_partition, format| {
        let train: Vec<&str> = v2_train.iter().map(String::as_str).collect();
        let dev: Vec<&str> = v2_dev.iter().map(String::as_str).collect();
        DatasetConfig::remote(
            Corpus::Korquad,
            name,
            &[(Train, &train[..]), (dev_partition, &dev[..])],
            ParserKind::Korquad(format),
        )
        .with_homepage(homepage)
    };

    vec![
        v1("v1.0", Validation),
        v1("v1.0.split", Test).with_split(SplitPreset::Holdout),
        v2("v2.1", Validation, korquad::Format::V2),
        v2("v2.1.split", Test, korquad::Format::V2).with_split(SplitPreset::Holdout),
        v2("v2.1.html", Validation, korquad::Format::V2Html),
        v2("v2.1.html.split", Test, korquad::Format::V2Html).with_split(SplitPreset::Holdout),
    ]
}

const NIKL_NEWSPAPER: &str = "NIKL/v1.0/NEWSPAPER/*.json";
const NIKL_SPOKEN: &str = "NIKL/v1.0/SPOKEN/*.json";

fn nikl_configs() -> Vec<DatasetConfig> {
    let manual = |name: &str, root: &str, patterns: &[&str], format| {
        DatasetConfig::manual(
            Corpus::Nikl,
            name,
            &format!("NIKL/v1.0/{}", root),
            &[(Train, patterns)],
            ParserKind::Nikl(format),
        )
        .with_homepage("https://corpus.korean.go.kr/")
    };
    // <name> and <name>.split
    let with_split = |config: DatasetConfig, preset| {
        let split = config
            .clone()
            .with_split(preset)
            .renamed(&format!("{}.split", config.name));
        vec![config, split]
    };
    let json = &["*.json"][..];

    let mut configs = Vec::new();

    configs.push(manual("newspaper.v1.0", "NEWSPAPER", json, nikl::Format::Newspaper));
    configs.extend(with_split(
        manual("newspaper.v1.0.page", "NEWSPAPER", json, nikl::Format::NewspaperPage),
        SplitPreset::RawCorpus,
    ));

    for (prefix, root) in [("web", "WEB"), ("written", "WRITTEN")] {
        configs.push(manual(&format!("{}.v1.0", prefix), root, json, nikl::Format::Written));
        configs.extend(with_split(
            manual(&format!("{}.v1.0.page", prefix), root, json, nikl::Format::WrittenPage),
            SplitPreset::RawCorpus,
        ));
        configs.push(manual(
            &format!("{}.v1.0.paragraph_page", prefix),
            root,
            json,
            nikl::Format::ParagraphPage,
        ));
    }

    let conversations = [
        ("spoken", "SPOKEN", &["?[!E]*.json"][..], nikl::Format::Spoken),
        ("messenger", "MESSENGER", json, nikl::Format::Messenger),
    ];
    for (prefix, root, patterns, format) in conversations {
        configs.push(manual(&format!("{}.v1.0", prefix), root, patterns, format));
        configs.extend(with_split(
            manual(
                &format!("{}.v1.0.utterance", prefix),
                root,
                patterns,
                nikl::Format::Utterance,
            ),
            SplitPreset::DownstreamTask,
        ));
    }

    let sentences = [
        ("mp.v1.0", "MP", json),
        ("ls.v1.0", "LS", json),
        ("ne.v1.0", "NE", json),
        ("dp.v1.0", "DP", json),
        ("ne.2020.v1.0", "NE_2020", &["*.JSON", "*.json"][..]),
    ];
    for (name, root, patterns) in sentences {
        configs.extend(with_split(
            manual(name, root, patterns, nikl::Format::Sentence),
            SplitPreset::DownstreamTask,
        ));
    }

    let newspaper = Extra::Documents {
        patterns: vec![NIKL_NEWSPAPER.to_string()],
    };
    let summarization = [
        ("summarization.v1.0", nikl::Format::Summarization),
        ("summarization.v1.0.summary", nikl::Format::SummarizationSummary),
        ("summarization.v1.0.topic", nikl::Format::SummarizationTopic),
    ];
    for (name, format) in summarization {
        configs.extend(with_split(
            manual(name, "SUMMARIZATION", json, format).with_extra(newspaper.clone()),
            SplitPreset::DownstreamTask,
        ));
    }

    configs.extend(with_split(
        manual("paraphrase.v1.0", "PARAPHRASE", json, nikl::Format::Paraphrase).with_extra(
            Extra::Documents {
                patterns: vec![NIKL_NEWSPAPER.to_string(), NIKL_SPOKEN.to_string()],
            },
        ),
        SplitPreset::DownstreamTask,
    ));

    configs.push(
        DatasetConfig::manual(
            Corpus::Nikl,
            "cola.v1.0",
            "NIKL/v1.0/CoLA",
            &[
                (Train, &["NIKL_CoLA_in_domain_train.tsv"]),
                (Validation, &["NIKL_CoLA_in_domain_dev.tsv"]),
                (Test, &["NIKL_CoLA_out_of_domain_dev.tsv"]),
            ],
            ParserKind::Nikl(nikl::Format::Cola),
        )
        .with_homepage("https://corpus.korean.go.kr/"),
    );

    configs.push(manual("cr.2020.v1.0", "CR_2020", json, nikl::Format::Coreference));
    configs.push(manual("cr.2020.full.v1.0", "CR_2020", json, nikl::Format::CoreferenceFull));

    configs
}

fn kor_corpora_config(
    name: &str,
    urls: &[(Partition, &[&str])],
    format: kor_corpora::Format,
    homepage: &str,
) -> DatasetConfig {
    DatasetConfig::remote(Corpus::KorCorpora, name, urls, ParserKind::KorCorpora(format))
        .with_homepage(homepage)
}

const KORNLU_ROOT: &str = "https://raw.githubusercontent.com/kakaobrain/KorNLUDatasets/master";

fn kor_corpora_configs() -> Vec<DatasetConfig> {
    let nsmc_train = "https://raw.githubusercontent.com/e9t/nsmc/master/ratings_train.txt";
    let nsmc_test = "https://raw.githubusercontent.com/e9t/nsmc/master/ratings_test.txt";
    let nsmc_home = "https://github.com/e9t/nsmc";

    let qpair_train =
        "https://raw.githubusercontent.com/songys/Question_pair/master/kor_pair_train.csv";
    let qpair_test =
        "https://raw.githubusercontent.com/songys/Question_pair/master/kor_Pair_test.csv";
    let qpair_home = "https://github.com/songys/Question_pair";

    let kornli = |file: &str| format!("{}/KorNLI/{}", KORNLU_ROOT, file);
    let (multinli, snli, xnli_dev, xnli_test) = (
        kornli("multinli.train.ko.tsv"),
        kornli("snli_1.0_train.ko.tsv"),
        kornli("xnli.dev.ko.tsv"),
        kornli("xnli.test.ko.tsv"),
    );
    let korsts = |file: &str| format!("{}/KorSTS/{}", KORNLU_ROOT, file);
    let (sts_train, sts_dev, sts_test) = (
        korsts("sts-train.tsv"),
        korsts("sts-dev.tsv"),
        korsts("sts-test.tsv"),
    );
    let kornlu_home = "https://github.com/kakaobrain/KorNLUDatasets";

    let khsd_train =
        "https://raw.githubusercontent.com/kocohub/korean-hate-speech/master/labeled/train.tsv";
    let khsd_dev =
        "https://raw.githubusercontent.com/kocohub/korean-hate-speech/master/labeled/dev.tsv";
    let khsd_home = "https://github.com/kocohub/korean-hate-speech";

    vec![
        kor_corpora_config(
            "nsmc",
            &[(Train, &[nsmc_train]), (Test, &[nsmc_test])],
            kor_corpora::Format::Nsmc,
            nsmc_home,
        ),
        kor_corpora_config(
            "nsmc.split",
            &[(Train, &[nsmc_train]), (Test, &[nsmc_test])],
            kor_corpora::Format::Nsmc,
            nsmc_home,
        )
        .with_split(SplitPreset::Holdout),
        kor_corpora_config(
            "qpair",
            &[(Train, &[qpair_train]), (Test, &[qpair_test])],
            kor_corpora::Format::Qpair,
            qpair_home,
        ),
        kor_corpora_config(
            "qpair.split",
            &[(Train, &[qpair_train]), (Test, &[qpair_test])],
            kor_corpora::Format::Qpair,
            qpair_home,
        )
        .with_split(SplitPreset::Holdout),
        kor_corpora_config(
            "kornli",
            &[
                (Train, &[multinli.as_str(), snli.as_str()]),
                (Validation, &[xnli_dev.as_str()]),
                (Test, &[xnli_test.as_str()]),
            ],
            kor_corpora::Format::Kornli,
            kornlu_home,
        ),
        kor_corpora_config(
            "kornli.split",
            &[
                (Train, &[multinli.as_str(), snli.as_str()]),
                (Test, &[xnli_test.as_str()]),
            ],
            kor_corpora::Format::Kornli,
            kornlu_home,
        )
        .with_split(SplitPreset::Holdout),
        kor_corpora_config(
            "korsts",
            &[
                (Train, &[sts_train.as_str()]),
                (Validation, &[sts_dev.as_str()]),
                (Test, &[sts_test.as_str()]),
            ],
            kor_corpora::Format::Korsts,
            kornlu_home,
        ),
        kor_corpora_config(
            "korsts.split",
            &[(Train, &[sts_train.as_str()]), (Test, &[sts_test.as_str()])],
            kor_corpora::Format::Korsts,
            kornlu_home,
        )
        .with_split(SplitPreset::Holdout),
        kor_corpora_config(
            "khsd",
            &[(Train, &[khsd_train]), (Validation, &[khsd_dev])],
            kor_corpora::Format::Khsd,
            khsd_home,
        ),
        kor_corpora_config(
            "khsd.split",
            &[(Train, &[khsd_train]), (Test, &[khsd_dev])],
            kor_corpora::Format::Khsd,
            khsd_home,
        )
        .with_split(SplitPreset::Holdout),
    ]
}
