// src/generation/prompts.rs

/// A header the model is told to emit, with the guidance placed under it.
#[derive(Debug, Clone, Copy)]
pub struct PromptSection {
    pub title: &'static str,
    pub guidance: &'static [&'static str],
}

/// Prompt text with a `{subject}` placeholder in the preamble, followed by the
/// section headers in the exact `Title:` form the splitter recognizes.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub preamble: &'static str,
    pub sections: &'static [PromptSection],
}

const SUBJECT_PLACEHOLDER: &str = "{subject}";

impl PromptTemplate {
    pub fn render(&self, subject: &str) -> String {
        let mut prompt = self.preamble.replace(SUBJECT_PLACEHOLDER, subject);
        prompt.push_str("\n\n");
        for section in self.sections {
            prompt.push_str(&format!("\t{}:\n", section.title));
            for line in section.guidance {
                prompt.push_str(&format!("\t\t<{}>\n", line));
            }
            prompt.push('\n');
        }
        prompt
    }

    pub fn titles(&self) -> impl Iterator<Item = &'static str> {
        self.sections.iter().map(|s| s.title)
    }
}

pub const PART_ONE: PromptTemplate = PromptTemplate {
    preamble: "You are a Generative AI model responsible for generating an Automotive Cybersecurity report on item definition for the item {subject}. Generate the maximum possible content for each of the subheadings given below. Follow the format strictly: no additional words or symbols in the headers given below, and every header below must be included:",
    sections: &[
        PromptSection {
            title: "Purpose",
            guidance: &["Mention the purpose of the item definition document"],
        },
        PromptSection {
            title: "Scope",
            guidance: &["Define what is in scope and not in scope of item definition"],
        },
        PromptSection {
            title: "Definitions, Acronyms and Abbreviations",
            guidance: &["Generate a table with the columns: Acronym | Description"],
        },
        PromptSection {
            title: "Overview of Item",
            guidance: &["Mention the details of the item under development, briefly describe the development strategies like newly developed, reused etc."],
        },
        PromptSection {
            title: "Components of the item",
            guidance: &["Identify the components of the item and create a table with the columns: Item/Component | New development/Reuse/Reuse with modification | Remarks"],
        },
        PromptSection {
            title: "Operational environment of the item",
            guidance: &[
                "Provide the description of the operational environment in which the item will be operational.",
                "E.g. The environment/platform in which users run application software, user interface used by the program or item, etc.",
            ],
        },
        PromptSection {
            title: "Item Boundary",
            guidance: &["Identify the item boundary indicating all the external interfaces of the item. These interfaces can include interfaces internal and/or external to the vehicle."],
        },
        PromptSection {
            title: "Interaction with other Items/Component",
            guidance: &["List all the other items / components with which the item under consideration will interact in a table with the columns: Sl No | Items/Component | Purpose"],
        },
        PromptSection {
            title: "Internal Interfaces",
            guidance: &["Elaborate all internal components of the item and their interactions."],
        },
        PromptSection {
            title: "Assets of the Item",
            guidance: &["Provide a detailed description of the assets in the item, identified to perform Threat Analysis and Risk Assessment, in a table with the columns: Sl No | Assets Identified | Functionality"],
        },
    ],
};

pub const PART_TWO: PromptTemplate = PromptTemplate {
    preamble: "You are a Generative AI model responsible for generating an Automotive Cybersecurity report on item definition for the item {subject}. Generate the maximum possible content for each of the subheadings given below. Follow the format strictly: no additional words or symbols in the headers given below:",
    sections: &[
        PromptSection {
            title: "Cybersecurity Requirements",
            guidance: &["Provide a description of the cybersecurity requirements for the item under consideration"],
        },
        PromptSection {
            title: "Assumptions",
            guidance: &[
                "Assumptions about the item and its operational environment shall be identified. Include assumptions on physical aspects and connectivity aspects.",
                "For example: assumptions on physical aspects can include that the item will be placed in an anti-tamper enclosure. Assumptions on connectivity aspects can include that every PKI certificate authority the item relies on is appropriately managed.",
            ],
        },
        PromptSection {
            title: "Constraints and compliance",
            guidance: &["Document the constraints and other standard compliance requirements. Constraints can include functional constraints, technical constraints etc. and compliances can include adherence to statutory and regulatory requirements and/or any other standards etc."],
        },
        PromptSection {
            title: "Known Vulnerabilities",
            guidance: &["Provide details of the already known cybersecurity vulnerabilities"],
        },
    ],
};
